//! Field data model: mirrors, zones, and the in-memory store.
//!
//! Data flows into this layer once per session from the data provider (JSON
//! deserialization via [`RawFieldPoint`]) and is immutable afterwards. The
//! hit-tester and renderer read from [`FieldStore`] in load order, which is
//! what makes hit-test tie-breaking deterministic.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::collections::HashMap;

use serde::Deserialize;

/// Field zone a mirror belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    A,
    B,
    C,
    D,
}

impl Zone {
    /// All zones in display order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Parse a provider zone string. Accepts either case, with surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            _ => None,
        }
    }

    /// Zone label as shown in the UI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

/// A single heliostat, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPoint {
    /// Provider-assigned mirror name, unique within the field.
    pub id: String,
    /// East offset from the tower in meters.
    pub x: f64,
    /// North offset from the tower in meters.
    pub y: f64,
    /// Zone the mirror belongs to.
    pub zone: Zone,
    /// Surface cleanliness in percent, clamped to `[0, 100]`.
    pub cleanliness: f64,
}

/// A field point as it arrives on the wire. Every field is optional so a
/// malformed record deserializes instead of failing the whole payload; the
/// store filters and counts the rejects.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFieldPoint {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub cleanliness: Option<f64>,
}

impl FieldPoint {
    /// Validate a wire record. `None` when the id is empty, a coordinate is
    /// missing or non-finite, the zone is unknown, or cleanliness is absent.
    /// Out-of-range cleanliness on an otherwise valid record is clamped.
    #[must_use]
    pub fn from_raw(raw: RawFieldPoint) -> Option<Self> {
        let id = raw.id.filter(|id| !id.trim().is_empty())?;
        let x = raw.x.filter(|v| v.is_finite())?;
        let y = raw.y.filter(|v| v.is_finite())?;
        let zone = Zone::parse(raw.zone.as_deref()?)?;
        let cleanliness = raw.cleanliness.filter(|v| v.is_finite())?.clamp(0.0, 100.0);
        Some(Self { id, x, y, zone, cleanliness })
    }
}

/// Outcome of loading a snapshot into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Records accepted into the store.
    pub loaded: usize,
    /// Malformed records filtered out.
    pub skipped: usize,
}

/// In-memory store of field points.
///
/// Points are kept in load order (the hit-test tie-break order) with an id
/// index on the side for O(1) lookup.
pub struct FieldStore {
    points: Vec<FieldPoint>,
    index: HashMap<String, usize>,
}

impl FieldStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { points: Vec::new(), index: HashMap::new() }
    }

    /// Replace the store contents with a snapshot of wire records.
    ///
    /// Malformed records are dropped and counted; the count is logged so a
    /// bad provider payload is visible without breaking the render. A record
    /// repeating an earlier id replaces it in place, keeping scan order
    /// stable.
    pub fn load_snapshot(&mut self, raw: Vec<RawFieldPoint>) -> LoadReport {
        self.points.clear();
        self.index.clear();

        let total = raw.len();
        for record in raw {
            let Some(point) = FieldPoint::from_raw(record) else {
                continue;
            };
            if let Some(&slot) = self.index.get(&point.id) {
                self.points[slot] = point;
            } else {
                self.index.insert(point.id.clone(), self.points.len());
                self.points.push(point);
            }
        }

        let report = LoadReport { loaded: self.points.len(), skipped: total - self.points.len() };
        if report.skipped > 0 {
            log::warn!(
                "filtered {} malformed field point(s) out of {total} in snapshot",
                report.skipped
            );
        }
        report
    }

    /// All points in load order.
    #[must_use]
    pub fn points(&self) -> &[FieldPoint] {
        &self.points
    }

    /// Look up a point by exact id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FieldPoint> {
        self.index.get(id).map(|&slot| &self.points[slot])
    }

    /// Find a point by id, exact match first, then ASCII-case-insensitive.
    #[must_use]
    pub fn search(&self, query: &str) -> Option<&FieldPoint> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if let Some(point) = self.get(query) {
            return Some(point);
        }
        self.points.iter().find(|p| p.id.eq_ignore_ascii_case(query))
    }

    /// Number of points currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the store contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}
