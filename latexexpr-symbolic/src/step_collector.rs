/// Receives the steps taken by an algorithm, such as the rewriting rules applied by
/// [`simplify_with_steps`](crate::simplify::simplify_with_steps).
///
/// Collect steps into a `Vec<S>`, or pass `&mut ()` to discard them.
pub trait StepCollector<S> {
    /// Records a step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
