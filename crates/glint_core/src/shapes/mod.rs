//! Primitive shapes.
//!
//! Bounded shapes (`Sphere`, `Polygon`, `Triangle`, `Cylinder`) report a
//! bounding box and take part in BVH construction. `Plane` and `Tube` are
//! infinite and are always tested.

mod cylinder;
mod plane;
mod polygon;
mod sphere;
mod triangle;
mod tube;

pub use cylinder::Cylinder;
pub use plane::Plane;
pub use polygon::Polygon;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;
