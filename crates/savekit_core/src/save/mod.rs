mod bytes;
/// Format dispatch and the binary, XML, and JSON codecs.
pub mod codec;
mod decimal;
mod depth;
mod encoding;
mod error;
mod fields;
mod file;
mod member;
mod persist;
mod quick;
mod registry;
mod scalar;
mod settings;
/// Shared recursive lowering and raising used by every codec.
pub mod traverse;
mod tree;

/// Extension-selected format and codec seam.
pub use codec::{Codec, Format};
/// Fixed-point decimal scalar.
pub use decimal::{Decimal, ParseDecimalError};
/// Depth governor.
pub use depth::{Depth, MAX_DEPTH, should_descend};
/// Text encodings for tokens and documents.
pub use encoding::TextEncoding;
/// Error and result aliases.
pub use error::{Result, SaveError};
/// Save-field object model.
pub use fields::{SaveField, SaveFields};
/// File-bound save collection.
pub use file::SaveFile;
/// Member descriptors and introspection policy.
pub use member::{Access, Member, MemberDescriptor, MemberInfo, MemberPolicy, describe};
/// Persistence capability and classification.
pub use persist::{Class, Persist, Persistable};
/// One-shot save and load helpers.
pub use quick::{quick_load, quick_save};
/// Type tag registry.
pub use registry::Registry;
/// Scalar kinds and text conversion.
pub use scalar::{ScalarKind, ScalarValue};
/// Per-file configuration.
pub use settings::Settings;
/// Traversal options.
pub use traverse::TraverseOptions;
/// Format-neutral frame tree.
pub use tree::{Entry, Frame, FrameKind, Node, RootFrame, SCALAR_VALUE_KEY};
