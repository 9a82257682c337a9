//! Translator from TypeScript declaration files to Tern JSON type definitions
//!
//! # Example
//!
//! ```
//! use tern_dts::translate;
//!
//! let doc = translate(
//!     "declare namespace mylib { function add(a: number, b?: string): void; }",
//!     "mylib",
//! ).unwrap();
//! assert_eq!(
//!     doc.to_json().unwrap(),
//!     r#"{"mylib":{"add":"fn(a: number, b?: string)"},"!name":"mylib"}"#
//! );
//! ```

pub mod ast;
pub mod atom;
pub mod doc;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod translate;

pub use atom::{Atom, AtomTable, CheapClone};
pub use doc::{Document, TypeDoc, TypeMap};
pub use error::TranslateError;
pub use parser::Parser;
pub use translate::{TranslateOptions, Translator};

/// Translate declaration-file source into a Tern document named `name`.
pub fn translate(text: &str, name: &str) -> Result<Document, TranslateError> {
    translate_with_options(text, name, &TranslateOptions::default())
}

/// Like [`translate`], with explicit options.
pub fn translate_with_options(
    text: &str,
    name: &str,
    options: &TranslateOptions,
) -> Result<Document, TranslateError> {
    let mut atoms = AtomTable::with_common_names();
    let file = Parser::new(text, &mut atoms).parse_source_file(name)?;
    Translator::new(options).translate_file(&file)
}
