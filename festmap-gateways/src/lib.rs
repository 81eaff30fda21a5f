pub mod geojson_surface;
