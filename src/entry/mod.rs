//! Entering new records: the entry page, the form and the endpoint that appends to the store.

mod create_endpoint;
mod create_page;
mod form;

pub use create_endpoint::create_record_endpoint;
pub use create_page::get_new_record_page;
pub use form::get_category_options;

pub(crate) use form::record_form;
