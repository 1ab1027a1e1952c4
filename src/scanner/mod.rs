mod dispatch;
mod entry_file;
mod filter;
mod pagination;
mod projects;

pub use dispatch::{dispatch_scan, start_crawl_scan, start_discovery};
pub use entry_file::{read_entry_point_ids, read_list, write_entry_point_ids};
pub use filter::filter_by_url_substring;
pub use pagination::{PAGE_SIZE, PaginationOptions, fetch_entry_points};
pub use projects::{clean_names, create_projects};
