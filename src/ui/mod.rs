/// UI building blocks
///
/// View helpers for the two image panes (original / edited).

pub mod panes;
