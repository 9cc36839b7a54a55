//! Capability shared by every simulated entity.

use lane_defence_core::Rect;

/// Behaviour every registry-owned entity exposes to the world.
///
/// `update` advances state that depends on the entity alone; interactions
/// between entities are resolved by the world after the update. `snapshot`
/// is the drawable, read-only description handed to adapters, and removal
/// goes through the owning registry by [`Entity::id`].
pub(crate) trait Entity {
    /// Identifier type keying the entity in its registry.
    type Id: Copy + Ord;
    /// Read-only description exposed through queries.
    type Snapshot;
    /// Side effect requested by a single update step.
    type Output;

    fn id(&self) -> Self::Id;

    fn rect(&self) -> Rect;

    fn update(&mut self) -> Self::Output;

    fn snapshot(&self) -> Self::Snapshot;
}
