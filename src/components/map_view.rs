//! Map View Component
//!
//! Leaflet map with one marker per visible location. Clicks are forwarded to
//! the registry (placement mode); marker clicks open the location card.

use leptos::html;
use leptos::prelude::*;
use location_registry::Location;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::MapConfig;
use crate::context::{use_app_context, AppContext};
use crate::leaflet::{self, MapMouseEvent, MapOptions, TileOptions};

/// A mounted Leaflet map and the JS callbacks it holds
struct MountedMap {
    map: leaflet::Map,
    markers: leaflet::LayerGroup,
    _on_click: Closure<dyn FnMut(MapMouseEvent)>,
    marker_handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl MountedMap {
    fn mount(element: &web_sys::HtmlElement, config: &MapConfig, ctx: AppContext) -> Result<Self, JsValue> {
        let options = leaflet::to_options(&MapOptions {
            center: config.center,
            zoom: config.zoom,
            scroll_wheel_zoom: true,
            max_bounds_viscosity: 1.0,
        })?;
        let map = leaflet::map(element, &options);
        map.set_max_bounds(&leaflet::bounds(config.max_bounds));

        let tile_options = leaflet::to_options(&TileOptions {
            attribution: &config.attribution,
        })?;
        leaflet::tile_layer(&config.tile_url, &tile_options).add_to(&map);

        let markers = leaflet::layer_group();
        markers.add_to(&map);

        let on_click = Closure::<dyn FnMut(MapMouseEvent)>::new(move |event: MapMouseEvent| {
            let point = event.latlng();
            let placed = ctx.with_registry(|r| r.on_map_click(point.lat(), point.lng()));
            if placed {
                log::debug!("draft placed at {}, {}", point.lat(), point.lng());
            } else {
                ctx.selected.set(None);
            }
        });
        map.on("click", on_click.as_ref().unchecked_ref());

        Ok(Self {
            map,
            markers,
            _on_click: on_click,
            marker_handlers: Vec::new(),
        })
    }

    fn render_markers(&mut self, locations: &[Location], ctx: AppContext) {
        self.markers.clear_layers();
        self.marker_handlers.clear();

        for location in locations {
            let marker = leaflet::marker(&leaflet::lat_lng(
                location.position.latitude,
                location.position.longitude,
            ));
            marker.bind_tooltip(&location.title);

            let id = location.id.clone();
            let on_click = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
                ctx.selected.set(Some(id.clone()));
            });
            marker.on("click", on_click.as_ref().unchecked_ref());

            self.markers.add_layer(&marker);
            self.marker_handlers.push(on_click);
        }
    }
}

#[component]
pub fn MapView(config: MapConfig) -> impl IntoView {
    let ctx = use_app_context();
    let container = NodeRef::<html::Div>::new();
    let mounted = StoredValue::new_local(None::<MountedMap>);

    Effect::new(move |_| {
        let Some(element) = container.get() else { return };
        mounted.update_value(|slot| {
            if slot.is_none() {
                match MountedMap::mount(&element, &config, ctx) {
                    Ok(map) => *slot = Some(map),
                    Err(e) => log::error!("failed to mount map: {:?}", e),
                }
            }
            if let Some(map) = slot {
                ctx.visible.with(|visible| map.render_markers(visible, ctx));
            }
        });
    });

    on_cleanup(move || {
        mounted.update_value(|slot| {
            if let Some(mounted) = slot.take() {
                mounted.map.remove();
            }
        });
    });

    view! {
        <div class="map-container" node_ref=container></div>
    }
}
