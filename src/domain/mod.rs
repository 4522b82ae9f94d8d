pub mod char_class;
pub mod error;

pub use char_class::CharClass;
pub use error::GraphError;
