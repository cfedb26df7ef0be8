use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;

use super::*;
use crate::bins::{Bin, BinRegistry, BinStatus, WasteCategory};
use crate::config::{MapParams, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::filter::{toggle_category, FilterOption, FilterSelection};
use crate::geo::{LatLng, TileCoord};
use crate::styling;

fn bin(id: &str, status: BinStatus, categories: &[WasteCategory]) -> Bin {
    Bin::new(
        id,
        format!("{id} Street"),
        LatLng::new(-1.285, 36.82),
        status,
        categories.iter().copied(),
    )
}

fn three_bins() -> Vec<Bin> {
    vec![
        bin("A", BinStatus::Available, &[WasteCategory::Plastic]),
        bin("B", BinStatus::Full, &[WasteCategory::Organic]),
        bin(
            "C",
            BinStatus::Maintenance,
            &[WasteCategory::Plastic, WasteCategory::Metal],
        ),
    ]
}

fn ready_renderer() -> MapRenderer {
    let mut renderer = MapRenderer::default();
    renderer
        .initialize(DEFAULT_CENTER, DEFAULT_ZOOM, TileLayer::default())
        .unwrap();
    renderer
}

/// Run `f` with a `Commands` for `world`, then apply the queued commands.
fn with_commands<R>(world: &mut World, f: impl FnOnce(&mut Commands) -> R) -> R {
    let mut queue = CommandQueue::default();
    let result = {
        let mut commands = Commands::new(&mut queue, world);
        f(&mut commands)
    };
    queue.apply(world);
    result
}

fn bin_marker_count(world: &mut World) -> usize {
    world
        .query_filtered::<Entity, With<BinMarker>>()
        .iter(world)
        .count()
}

// -----------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------

#[test]
fn test_initialize_sets_viewport_and_layer() {
    let renderer = ready_renderer();
    assert_eq!(renderer.lifecycle(), MapLifecycle::Ready);
    assert_eq!(
        renderer.viewport(),
        Some(Viewport {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM
        })
    );
    assert!(renderer.base_layer().is_some());
}

#[test]
fn test_initialize_twice_fails() {
    let mut renderer = ready_renderer();
    let err = renderer
        .initialize(DEFAULT_CENTER, DEFAULT_ZOOM, TileLayer::default())
        .unwrap_err();
    assert_eq!(err, MapError::AlreadyInitialized);
}

#[test]
fn test_set_visible_bins_before_initialize_fails() {
    let mut world = World::new();
    let mut renderer = MapRenderer::default();
    let bins = three_bins();
    let result = with_commands(&mut world, |commands| {
        renderer.set_visible_bins(commands, &bins)
    });
    assert_eq!(result, Err(MapError::NotInitialized));
    assert_eq!(bin_marker_count(&mut world), 0);
}

#[test]
fn test_dispose_releases_everything_and_is_final() {
    let mut world = World::new();
    let mut renderer = ready_renderer();
    let bins = three_bins();
    with_commands(&mut world, |commands| {
        renderer.set_visible_bins(commands, &bins).unwrap();
        renderer
            .place_user_marker(commands, LatLng::new(-1.29, 36.81))
            .unwrap();
    });
    assert_eq!(world.entities().len(), 4);

    with_commands(&mut world, |commands| renderer.dispose(commands)).unwrap();
    assert_eq!(world.entities().len(), 0);
    assert_eq!(renderer.lifecycle(), MapLifecycle::Disposed);
    assert!(renderer.viewport().is_none());
    assert!(renderer.user_marker().is_none());

    let again = with_commands(&mut world, |commands| renderer.dispose(commands));
    assert_eq!(again, Err(MapError::Disposed));
    let refresh = with_commands(&mut world, |commands| {
        renderer.set_visible_bins(commands, &bins)
    });
    assert_eq!(refresh, Err(MapError::Disposed));
    assert_eq!(
        renderer.initialize(DEFAULT_CENTER, DEFAULT_ZOOM, TileLayer::default()),
        Err(MapError::Disposed)
    );
}

#[test]
fn test_dispose_before_initialize_fails() {
    let mut world = World::new();
    let mut renderer = MapRenderer::default();
    let result = with_commands(&mut world, |commands| renderer.dispose(commands));
    assert_eq!(result, Err(MapError::NotInitialized));
}

// -----------------------------------------------------------------------
// Bin markers
// -----------------------------------------------------------------------

#[test]
fn test_set_visible_bins_is_idempotent() {
    let mut world = World::new();
    let mut renderer = ready_renderer();
    let bins = three_bins();

    for _ in 0..2 {
        let count = with_commands(&mut world, |commands| {
            renderer.set_visible_bins(commands, &bins).unwrap()
        });
        assert_eq!(count, bins.len());
    }
    assert_eq!(bin_marker_count(&mut world), bins.len());
    assert_eq!(renderer.bin_markers().len(), bins.len());
}

#[test]
fn test_markers_carry_status_color_and_popup() {
    let mut world = World::new();
    let mut renderer = ready_renderer();
    let bins = three_bins();
    with_commands(&mut world, |commands| {
        renderer.set_visible_bins(commands, &bins).unwrap();
    });

    let c = renderer.bin_markers()[2];
    assert_eq!(world.get::<BinMarker>(c).unwrap().bin_id, "C");
    assert_eq!(
        world.get::<MarkerStyle>(c).unwrap().swatch,
        styling::status_color(BinStatus::Maintenance)
    );
    assert_eq!(
        world.get::<Popup>(c).unwrap().text(),
        "C Street\nStatus: Maintenance\nWaste Types: Plastic, Metal"
    );
    assert_eq!(world.get::<MapPosition>(c).unwrap().0, bins[2].position);
}

#[test]
fn test_refresh_keeps_user_marker() {
    let mut world = World::new();
    let mut renderer = ready_renderer();
    let bins = three_bins();
    let user = with_commands(&mut world, |commands| {
        renderer
            .place_user_marker(commands, LatLng::new(-1.29, 36.81))
            .unwrap()
    });

    with_commands(&mut world, |commands| {
        renderer.set_visible_bins(commands, &bins[..1]).unwrap();
    });

    assert_eq!(renderer.user_marker(), Some(user));
    assert!(world.get::<UserPositionMarker>(user).is_some());
    assert_eq!(bin_marker_count(&mut world), 1);
}

#[test]
fn test_empty_input_shows_empty_notice() {
    let mut world = World::new();
    let mut renderer = ready_renderer();
    let bins = three_bins();
    with_commands(&mut world, |commands| {
        renderer.set_visible_bins(commands, &bins).unwrap();
    });
    assert!(!renderer.shows_empty_notice());

    let count = with_commands(&mut world, |commands| {
        renderer
            .set_visible_bins(commands, std::iter::empty::<&Bin>())
            .unwrap()
    });
    assert_eq!(count, 0);
    assert_eq!(bin_marker_count(&mut world), 0);
    assert!(renderer.shows_empty_notice());
}

// -----------------------------------------------------------------------
// Tiles and popups
// -----------------------------------------------------------------------

#[test]
fn test_tile_url_expansion() {
    let layer = TileLayer::default();
    let url = layer.url(TileCoord { z: 15, x: 19735, y: 16500 });
    // (19735 + 16500) % 3 == 1
    assert_eq!(url, "https://b.tile.openstreetmap.org/15/19735/16500.png");

    let viewport = Viewport {
        center: DEFAULT_CENTER,
        zoom: DEFAULT_ZOOM,
    };
    assert_eq!(layer.center_tile_url(&viewport), url);
    assert_eq!(layer.attribution, "© OpenStreetMap contributors");
}

#[test]
fn test_tile_url_without_subdomains() {
    let layer = TileLayer {
        url_template: "https://tiles.example/{z}/{x}/{y}.png".to_string(),
        subdomains: Vec::new(),
        attribution: String::new(),
    };
    assert_eq!(
        layer.url(TileCoord { z: 2, x: 1, y: 3 }),
        "https://tiles.example/2/1/3.png"
    );
}

#[test]
fn test_popup_html_escapes_names() {
    let b = bin("D", BinStatus::Full, &[WasteCategory::Glass]);
    let mut popup = Popup::for_bin(&b);
    popup.title = "Tom & Jerry <Market>".to_string();
    assert_eq!(
        popup.html(),
        "<b>Tom &amp; Jerry &lt;Market&gt;</b><br>Status: Full<br>Waste Types: Glass"
    );
}

#[test]
fn test_user_popup_opens_with_label() {
    let popup = Popup::user_position();
    assert_eq!(popup.text(), USER_MARKER_LABEL);
    assert!(popup.open);
}

// -----------------------------------------------------------------------
// Plugin
// -----------------------------------------------------------------------

#[derive(Resource, Default)]
struct Refreshes(Vec<BinsRefreshed>);

fn record_refreshes(mut events: EventReader<BinsRefreshed>, mut seen: ResMut<Refreshes>) {
    seen.0.extend(events.read().copied());
}

fn map_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MapPlugin)
        .insert_resource(BinRegistry::new(three_bins()).unwrap())
        .init_resource::<Refreshes>()
        .add_systems(Update, record_refreshes.after(sync_bin_markers));
    app
}

#[test]
fn test_plugin_places_markers_on_first_frame() {
    let mut app = map_test_app();
    app.update();

    assert!(app.world().resource::<MapRenderer>().is_ready());
    assert_eq!(bin_marker_count(app.world_mut()), 3);
    assert_eq!(
        app.world().resource::<Refreshes>().0,
        vec![BinsRefreshed {
            visible: 3,
            total: 3
        }]
    );
}

#[test]
fn test_plugin_refreshes_only_on_change() {
    let mut app = map_test_app();
    app.update();
    app.update();
    assert_eq!(app.world().resource::<Refreshes>().0.len(), 1);

    let next = toggle_category(
        app.world().resource::<FilterSelection>(),
        FilterOption::Category(WasteCategory::Metal),
    );
    app.insert_resource(next);
    app.update();

    assert_eq!(bin_marker_count(app.world_mut()), 1);
    assert_eq!(
        app.world().resource::<Refreshes>().0.last(),
        Some(&BinsRefreshed {
            visible: 1,
            total: 3
        })
    );
}

#[test]
fn test_plugin_uses_map_params() {
    let mut app = map_test_app();
    let params = MapParams {
        zoom: 12,
        ..MapParams::default()
    };
    app.insert_resource(params);
    app.update();

    let renderer = app.world().resource::<MapRenderer>();
    assert_eq!(renderer.viewport().unwrap().zoom, 12);
}

#[test]
fn test_plugin_teardown_disposes_map() {
    let mut app = map_test_app();
    app.update();
    app.world_mut().send_event(MapTeardown);
    app.update();

    assert_eq!(
        app.world().resource::<MapRenderer>().lifecycle(),
        MapLifecycle::Disposed
    );
    assert_eq!(bin_marker_count(app.world_mut()), 0);
}
