//! lopdf rendering back end
//!
//! Turns the composed-page plan into an output `Document`:
//! - source pages become Form XObjects placed with `cm`/`Do` operators
//! - overlay text and borders are emitted as raw content-stream ops
//! - link annotations and the outline resolve against pre-reserved
//!   page object ids

mod page;
mod source;

pub(crate) use page::render_document;
