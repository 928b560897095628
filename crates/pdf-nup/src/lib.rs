pub mod assemble;
pub mod constants;
pub mod layout;
mod io;
mod options;
mod outline;
mod page;
mod render;
mod toc;
mod types;

pub use assemble::{assemble, run};
pub use io::{load_inputs, load_pdf, save_pdf};
pub use options::*;
pub use outline::OutlineBuilder;
pub use page::{ComposedPage, DocSlot, SourceRef};
pub use toc::{TocEntry, TocLayout, TocPage, paginate, toc_page_count};
pub use types::*;
