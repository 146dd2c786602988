mod point_group;
mod rotation_type;
mod space_group;

pub use point_group::PointGroup;
pub use space_group::SpaceGroup;
