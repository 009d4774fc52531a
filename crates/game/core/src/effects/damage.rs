//! Damage delivery from periodic effects to their owner.

/// Receives damage produced by periodic effects.
///
/// Implemented by whatever owns an actor's health. Closures work too, which
/// keeps tests and ad-hoc hosts short.
pub trait DamageSink {
    fn take_damage(&mut self, amount: f32);
}

impl<F> DamageSink for F
where
    F: FnMut(f32),
{
    fn take_damage(&mut self, amount: f32) {
        self(amount)
    }
}
