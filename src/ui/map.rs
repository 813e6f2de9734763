//! Map binding: markers, popup summaries and the viewport.
//!
//! The map never decides what to show. [`MarkerLayer::sync`] is handed the
//! engine's visible list after every recomputation and makes its marker set
//! equal to it, so the map and the list can never disagree about which
//! venues are visible.
//!
//! [`Viewport`] tracks the center and zoom level and projects coordinates
//! onto terminal cells using the Web Mercator ("slippy map") pixel formula.
//! Markers that fall outside the viewport stay in the layer; they are simply
//! not drawn.

use crate::domain::{Venue, VenueStatus};
use std::collections::HashSet;
use std::f64::consts::PI;

/// Width and height of one map tile in pixels.
const TILE_SIZE: f64 = 256.0;

/// Approximate pixel width of one terminal cell.
const CELL_WIDTH_PX: f64 = 8.0;

/// Approximate pixel height of one terminal cell.
const CELL_HEIGHT_PX: f64 = 16.0;

pub const MIN_ZOOM: u8 = 3;
pub const MAX_ZOOM: u8 = 19;
pub const DEFAULT_ZOOM: u8 = 15;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// NTU campus, Singapore.
pub const DEFAULT_CENTER: LatLng = LatLng::new(1.3483, 103.6831);

/// Marker iconography by verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    Verified,
    Check,
    /// Fallback for statuses the map does not know.
    Default,
}

impl MarkerIcon {
    #[must_use]
    pub const fn for_status(status: VenueStatus) -> Self {
        match status {
            VenueStatus::Verified => Self::Verified,
            VenueStatus::Check => Self::Check,
            VenueStatus::Unknown => Self::Default,
        }
    }

    /// Character drawn at the marker's cell.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Verified => '●',
            Self::Check => '◐',
            Self::Default => '○',
        }
    }
}

/// One venue pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub venue_id: u32,
    pub lat: f64,
    pub lng: f64,
    pub icon: MarkerIcon,
}

impl Marker {
    #[must_use]
    pub fn for_venue(venue: &Venue) -> Self {
        Self {
            venue_id: venue.id,
            lat: venue.lat,
            lng: venue.lng,
            icon: MarkerIcon::for_status(venue.status),
        }
    }
}

/// What changed in the last [`MarkerLayer::sync`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    /// Ids that gained a marker, in visible order.
    pub added: Vec<u32>,
    /// Ids that lost their marker, in previous order.
    pub removed: Vec<u32>,
    /// Whether markers present both before and after changed relative order.
    pub reordered: bool,
}

impl MarkerDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && !self.reordered
    }
}

/// The marker set currently on the map.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    /// Replaces the marker set with one marker per visible venue, in order.
    ///
    /// After this call the layer holds exactly the visible venues: no stale
    /// markers remain from earlier filter states.
    pub fn sync(&mut self, visible: &[&Venue]) -> MarkerDiff {
        let old_ids: Vec<u32> = self.markers.iter().map(|m| m.venue_id).collect();
        let new_ids: Vec<u32> = visible.iter().map(|v| v.id).collect();

        let old_set: HashSet<u32> = old_ids.iter().copied().collect();
        let new_set: HashSet<u32> = new_ids.iter().copied().collect();

        let added: Vec<u32> = new_ids.iter().copied().filter(|id| !old_set.contains(id)).collect();
        let removed: Vec<u32> = old_ids.iter().copied().filter(|id| !new_set.contains(id)).collect();

        let kept_before = old_ids.iter().filter(|id| new_set.contains(id));
        let kept_after = new_ids.iter().filter(|id| old_set.contains(id));
        let reordered = !kept_before.eq(kept_after);

        self.markers = visible.iter().map(|v| Marker::for_venue(v)).collect();

        let diff = MarkerDiff { added, removed, reordered };
        tracing::trace!(
            markers = self.markers.len(),
            added = diff.added.len(),
            removed = diff.removed.len(),
            reordered = diff.reordered,
            "marker layer synced"
        );
        diff
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn get(&self, venue_id: u32) -> Option<&Marker> {
        self.markers.iter().find(|m| m.venue_id == venue_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Read-only summary shown when a marker is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupSummary {
    pub name: String,
    pub cuisine: String,
    pub price: String,
    pub gf_option: String,
}

impl PopupSummary {
    #[must_use]
    pub fn for_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            cuisine: venue.cuisine.clone(),
            price: venue.price_range.to_string(),
            gf_option: venue.gf_option.clone(),
        }
    }

    /// `"{cuisine} • {price}"`, the popup's second line.
    #[must_use]
    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.cuisine, self.price)
    }
}

/// Visible map region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Viewport {
    /// Zooms in one level. Returns `false` at the maximum zoom.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom >= MAX_ZOOM {
            return false;
        }
        self.zoom += 1;
        true
    }

    /// Zooms out one level. Returns `false` at the minimum zoom.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom <= MIN_ZOOM {
            return false;
        }
        self.zoom -= 1;
        true
    }

    /// Centers on `position` at the default street-level zoom.
    pub fn recenter(&mut self, position: LatLng) {
        self.center = position;
        self.zoom = DEFAULT_ZOOM;
    }

    /// World pixel coordinates of `position` at the current zoom.
    fn world_pixels(&self, position: LatLng) -> (f64, f64) {
        let scale = TILE_SIZE * f64::from(1_u32 << self.zoom);
        let lat_rad = position.lat.to_radians();
        let x = (position.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * scale;
        (x, y)
    }

    /// Projects `position` onto a `cols` x `rows` grid centered on the
    /// viewport center. Returns `(col, row)`, or `None` if off-grid.
    #[must_use]
    pub fn project(&self, position: LatLng, cols: usize, rows: usize) -> Option<(usize, usize)> {
        if cols == 0 || rows == 0 {
            return None;
        }

        let (cx, cy) = self.world_pixels(self.center);
        let (px, py) = self.world_pixels(position);

        #[allow(clippy::cast_precision_loss)]
        let col = ((px - cx) / CELL_WIDTH_PX + cols as f64 / 2.0).floor();
        #[allow(clippy::cast_precision_loss)]
        let row = ((py - cy) / CELL_HEIGHT_PX + rows as f64 / 2.0).floor();

        #[allow(clippy::cast_precision_loss)]
        let in_bounds = col.is_finite()
            && row.is_finite()
            && col >= 0.0
            && row >= 0.0
            && col < cols as f64
            && row < rows as f64;
        if !in_bounds {
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cell = (col as usize, row as usize);
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceTier;

    fn venue(id: u32, status: VenueStatus, lat: f64, lng: f64) -> Venue {
        Venue {
            id,
            name: format!("Venue {id}"),
            status,
            distance: "100m".to_string(),
            price_range: PriceTier::new(2).unwrap(),
            cuisine: "Cafe".to_string(),
            rating: 4.0,
            review_count: 1,
            gf_option: "GF bread available upon request".to_string(),
            image: String::new(),
            lat,
            lng,
            has_promo: None,
        }
    }

    #[test]
    fn test_icons_follow_status() {
        assert_eq!(MarkerIcon::for_status(VenueStatus::Verified), MarkerIcon::Verified);
        assert_eq!(MarkerIcon::for_status(VenueStatus::Check), MarkerIcon::Check);
        assert_eq!(MarkerIcon::for_status(VenueStatus::Unknown), MarkerIcon::Default);
    }

    #[test]
    fn test_sync_leaves_no_stale_markers() {
        let a = venue(1, VenueStatus::Verified, 1.35, 103.68);
        let b = venue(2, VenueStatus::Check, 1.35, 103.69);
        let c = venue(3, VenueStatus::Unknown, 1.34, 103.68);
        let mut layer = MarkerLayer::default();

        let diff = layer.sync(&[&a, &b, &c]);
        assert_eq!(diff.added, vec![1, 2, 3]);
        assert!(diff.removed.is_empty());

        let diff = layer.sync(&[&c, &a]);
        assert_eq!(diff.removed, vec![2]);
        assert!(diff.added.is_empty());
        assert!(diff.reordered);
        let ids: Vec<u32> = layer.markers().iter().map(|m| m.venue_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(layer.get(3).map(|m| m.icon), Some(MarkerIcon::Default));

        let diff = layer.sync(&[&c, &a]);
        assert!(diff.is_empty());

        layer.sync(&[]);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_popup_summary() {
        let v = venue(13, VenueStatus::Check, 1.3113, 103.9385);
        let popup = PopupSummary::for_venue(&v);
        assert_eq!(popup.subtitle(), "Cafe • $$");
        assert_eq!(popup.gf_option, "GF bread available upon request");
    }

    #[test]
    fn test_zoom_clamps() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.zoom, DEFAULT_ZOOM);
        for _ in 0..10 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom, MAX_ZOOM);
        assert!(!viewport.zoom_in());
        for _ in 0..30 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom, MIN_ZOOM);
        assert!(!viewport.zoom_out());
    }

    #[test]
    fn test_recenter_resets_zoom() {
        let mut viewport = Viewport::default();
        viewport.zoom_out();
        viewport.recenter(LatLng::new(1.3041, 103.8316));
        assert_eq!(viewport.zoom, DEFAULT_ZOOM);
        assert!((viewport.center.lat - 1.3041).abs() < f64::EPSILON);
    }

    #[test]
    fn test_projection_center_and_directions() {
        let viewport = Viewport::default();
        assert_eq!(viewport.project(DEFAULT_CENTER, 40, 20), Some((20, 10)));

        let north_east = LatLng::new(DEFAULT_CENTER.lat + 0.003, DEFAULT_CENTER.lng + 0.002);
        let (col, row) = viewport.project(north_east, 40, 20).unwrap();
        assert!(col > 20);
        assert!(row < 10);

        let orchard = LatLng::new(1.3041, 103.8316);
        assert_eq!(viewport.project(orchard, 40, 20), None);
        assert_eq!(viewport.project(DEFAULT_CENTER, 0, 20), None);
    }
}
