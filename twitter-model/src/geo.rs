//! Geometries: tweet locations and place bounding boxes.
//!
//! Both variants compare by their `coordinates`, so two payloads describing
//! the same shape are equal even when they carry different extra keys.

use crate::entity::{Entity, key_equality};
use crate::factory::{Constructor, Family};
use crate::Context;
use serde_json::Value;
use std::sync::Arc;
use twitter_types::{Attrs, Result};

#[derive(Debug)]
pub struct Point {
    attrs: Attrs,
}

impl Point {
    pub fn coordinates(&self) -> &[Value] {
        coordinates(&self.attrs)
    }

    /// `coordinates[0]`.
    pub fn latitude(&self) -> Option<f64> {
        self.coordinates().first().and_then(Value::as_f64)
    }

    /// `coordinates[1]`.
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates().get(1).and_then(Value::as_f64)
    }

    /// `(latitude, longitude)` when both are present.
    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        Some((self.latitude()?, self.longitude()?))
    }
}

impl Entity for Point {
    const KIND: &'static str = "Geo::Point";

    fn from_attrs(_ctx: &Context, attrs: Attrs) -> Result<Self> {
        Ok(Self { attrs })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }
}

key_equality!(Point, "coordinates");

/// A closed ring (or set of rings) of coordinate pairs.
#[derive(Debug)]
pub struct Polygon {
    attrs: Attrs,
}

impl Polygon {
    pub fn coordinates(&self) -> &[Value] {
        coordinates(&self.attrs)
    }
}

impl Entity for Polygon {
    const KIND: &'static str = "Geo::Polygon";

    fn from_attrs(_ctx: &Context, attrs: Attrs) -> Result<Self> {
        Ok(Self { attrs })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }
}

key_equality!(Polygon, "coordinates");

fn coordinates(attrs: &Attrs) -> &[Value] {
    attrs.get_array("coordinates").map(Vec::as_slice).unwrap_or(&[])
}

/// The geometry family, dispatched on `type`.
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum Geo {
    Point(Arc<Point>),
    Polygon(Arc<Polygon>),
}

impl Geo {
    pub fn attrs(&self) -> &Attrs {
        match self {
            Self::Point(point) => point.attrs(),
            Self::Polygon(polygon) => polygon.attrs(),
        }
    }

    pub fn coordinates(&self) -> &[Value] {
        coordinates(self.attrs())
    }

    pub fn as_point(&self) -> Option<&Arc<Point>> {
        match self {
            Self::Point(point) => Some(point),
            Self::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Arc<Polygon>> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            Self::Point(_) => None,
        }
    }
}

fn point(ctx: &Context, attrs: Attrs) -> Result<Geo> {
    ctx.fetch_or_construct(attrs).map(Geo::Point)
}

fn polygon(ctx: &Context, attrs: Attrs) -> Result<Geo> {
    ctx.fetch_or_construct(attrs).map(Geo::Polygon)
}

impl Family for Geo {
    const NAME: &'static str = "Geo";
    const FIELD: &'static str = "type";
    const VARIANTS: &'static [(&'static str, Constructor<Self>)] =
        &[("Point", point), ("Polygon", polygon)];
}
