//! Command-line option registry and argument scanner.
//!
//! Declare options on an [`OptionSet`], then scan an argument vector:
//! - `--name value` and `-n value` for value-bearing options
//! - `-abc` clusters of single-character switches
//! - flags (options with a boolean default) complete on their own
//! - anything else lands in the remainder
//!
//! ```
//! use optarg::OptionSet;
//!
//! let set = OptionSet::new("prog")
//!     .header("General")
//!     .add('v', "verbose", "Print more.", false)
//!     .add('c', "count", "How many times.", 1);
//!
//! let m = set.parse(["prog", "-v", "--count", "3", "file"]).unwrap();
//! assert!(m.is_present("verbose"));
//! assert_eq!(m.get::<u32>("count").unwrap(), 3);
//! assert_eq!(m.remainder(), ["file"]);
//! ```

pub mod argfile;
mod error;
mod opt;
mod scan;
mod set;
pub mod usage;

pub use error::{Error, Result};
pub use opt::{parse_bool, Entry, FromValue, IntoValue, Opt, Value};
pub use scan::{Dangling, Match, Matches, Scan};
pub use set::OptionSet;
pub use usage::wrap;
