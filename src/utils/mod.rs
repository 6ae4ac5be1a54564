//! Shared utilities: IP helpers, text and dictionary helpers, XML conversion,
//! output and timing.

pub mod dict;
pub mod ip_utils;
pub mod output;
pub mod text;
pub mod timing;
pub mod xml;

pub use dict::{clean_zero_values, deref_multi, extract_path};
pub use ip_utils::{atoptr, is_ip, read_ips_from_file, reverse_pointer, IpError};
pub use output::{beautify, pretty, save_file};
pub use text::{is_int, max_length, minimal_recurring};
pub use timing::{debug_call, enable_debug, timer};
pub use xml::{xml2json, XmlError};
