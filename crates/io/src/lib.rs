// File I/O: reference sheets in, receipt text out, reports written back

pub mod csv;
pub mod documents;
pub mod reference;
pub mod render;
pub mod report;
pub mod xlsx;

pub use documents::discover;
pub use reference::load_table;
pub use render::FileRenderer;
