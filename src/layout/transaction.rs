use crate::canvas::Canvas;
use crate::error::LayoutError;

/// A single-slot holder for a canvas snapshot, used to render speculatively.
///
/// [`begin`](RenderTransaction::begin) copies the canvas's mutable state; the
/// caller then draws on the live canvas as usual. [`commit`](RenderTransaction::commit)
/// accepts what was drawn by dropping the copy, [`rollback`](RenderTransaction::rollback)
/// puts the copy back. Transactions do not nest: beginning a second one before
/// the first is resolved is an error.
///
/// ```
/// # use pdf_flow::layout::RenderTransaction;
/// # fn attempt<C: pdf_flow::Canvas>(canvas: &mut C) -> Result<(), pdf_flow::LayoutError> {
/// let mut tx = RenderTransaction::new();
/// tx.begin(canvas)?;
/// // ... draw something ...
/// if canvas.page_cursor().would_overflow(canvas.cursor_position().1) {
///     tx.rollback(canvas)?;
/// } else {
///     tx.commit()?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RenderTransaction<S> {
    snapshot: Option<S>,
}

impl<S> Default for RenderTransaction<S> {
    fn default() -> Self {
        RenderTransaction { snapshot: None }
    }
}

impl<S> RenderTransaction<S> {
    pub fn new() -> RenderTransaction<S> {
        RenderTransaction::default()
    }

    /// Snapshot `canvas` so that whatever is drawn next can be undone
    pub fn begin<C>(&mut self, canvas: &C) -> Result<(), LayoutError>
    where
        C: Canvas<Snapshot = S> + ?Sized,
    {
        if self.snapshot.is_some() {
            return Err(LayoutError::TransactionAlreadyOpen);
        }
        self.snapshot = Some(canvas.snapshot_state());
        Ok(())
    }

    /// Keep everything drawn since [`begin`](RenderTransaction::begin)
    pub fn commit(&mut self) -> Result<(), LayoutError> {
        self.snapshot
            .take()
            .map(drop)
            .ok_or(LayoutError::NoTransaction)
    }

    /// Put `canvas` back into the state it had at [`begin`](RenderTransaction::begin)
    pub fn rollback<C>(&mut self, canvas: &mut C) -> Result<(), LayoutError>
    where
        C: Canvas<Snapshot = S> + ?Sized,
    {
        let snapshot = self.snapshot.take().ok_or(LayoutError::NoTransaction)?;
        canvas.restore_state(snapshot);
        Ok(())
    }

    pub fn in_progress(&self) -> bool {
        self.snapshot.is_some()
    }
}
