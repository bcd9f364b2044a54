use thiserror::Error;

use crate::graph::ObjectId;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which covers every failure this library can report.
///
/// Errors fall into two groups with different scopes:
///
/// ## Load Errors
/// - [`Error::Malformed`] - A record could not be ingested. The whole load is aborted, a
///   partially built graph is never handed out.
///
/// ## Query Errors
/// - [`Error::UnreachableObject`] - The object was never reached from the root set
/// - [`Error::NoPathToRoot`] - No chain of referrers leads back to a root
/// - [`Error::UnknownObject`] - The handle does not belong to this graph
///
/// Query errors are local to the single call; the graph and the dominator tree are not
/// affected and other queries keep working.
///
/// References to addresses that were never ingested (dangling references) are not an
/// error. They are dropped while finalizing the graph and only show up in
/// [`crate::heap::GraphStats::dangling_references`].
///
/// # Examples
///
/// ```rust
/// use heapscope::{Error, HeapSnapshot, AnalysisConfig};
/// use heapscope::heap::{ObjectRecord, Record};
///
/// let records = vec![Record::Object(ObjectRecord::new("STRING", 0))];
/// match HeapSnapshot::from_records(records, AnalysisConfig::default()) {
///     Ok(_) => println!("Loaded"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed record: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A record is missing a required field or carries an invalid one.
    ///
    /// Raised for absent or zero addresses, unknown object kinds, duplicate addresses
    /// and object records that claim to be roots. The error includes the source location
    /// where the malformation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The object was not visited by the depth-first walk from the root set.
    ///
    /// Returned by dominator and retained-size queries for objects that no root
    /// (transitively) references, and for the synthetic super-root, which has no
    /// immediate dominator.
    #[error("Object {0} is not reachable from the root set")]
    UnreachableObject(ObjectId),

    /// The breadth-first search over referrers ran out of objects before reaching a root.
    #[error("No path to a root exists for object {0}")]
    NoPathToRoot(ObjectId),

    /// The object handle is outside of the graph it was used with.
    ///
    /// Handles are only meaningful for the graph that issued them.
    #[error("Object {0} does not exist in this graph")]
    UnknownObject(ObjectId),
}
