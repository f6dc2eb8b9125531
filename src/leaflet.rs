//! Leaflet Bindings
//!
//! Minimal bindings to the global `L` object loaded from `index.html`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `L.Map`
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn map(element: &web_sys::HtmlElement, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = setMaxBounds)]
    pub fn set_max_bounds(this: &Map, bounds: &JsValue) -> Map;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &js_sys::Function) -> Map;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map) -> Map;

    /// `L.TileLayer`
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

    /// `L.LayerGroup`, holds the markers so they can be swapped at once
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &LayerGroup, map: &Map) -> LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &LayerGroup, layer: &Marker) -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &LayerGroup) -> LayerGroup;

    /// `L.Marker`
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(lat_lng: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = bindTooltip)]
    pub fn bind_tooltip(this: &Marker, content: &str) -> Marker;

    #[wasm_bindgen(method)]
    pub fn on(this: &Marker, event: &str, handler: &js_sys::Function) -> Marker;

    /// `L.LeafletMouseEvent`
    pub type MapMouseEvent;

    #[wasm_bindgen(method, getter)]
    pub fn latlng(this: &MapMouseEvent) -> LatLng;

    /// `L.LatLng`
    pub type LatLng;

    #[wasm_bindgen(method, getter)]
    pub fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn lng(this: &LatLng) -> f64;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: [f64; 2],
    pub zoom: f64,
    pub scroll_wheel_zoom: bool,
    pub max_bounds_viscosity: f64,
}

#[derive(Serialize)]
pub struct TileOptions<'a> {
    pub attribution: &'a str,
}

/// Leaflet accepts `[lat, lng]` arrays wherever a `LatLng` is expected
pub fn lat_lng(latitude: f64, longitude: f64) -> JsValue {
    js_sys::Array::of2(&latitude.into(), &longitude.into()).into()
}

pub fn bounds(corners: [[f64; 2]; 2]) -> JsValue {
    let [[south, west], [north, east]] = corners;
    js_sys::Array::of2(&lat_lng(south, west), &lat_lng(north, east)).into()
}

pub fn to_options<T: Serialize>(options: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    options.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
