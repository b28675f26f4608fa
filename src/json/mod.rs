//! JSON Import/Export für Diagramm-Dokumente.
//!
//! Ein Dokument ist ein einzelnes `Elements`-Objekt mit camelCase-Schlüsseln.

pub mod parser;
pub mod writer;

pub use parser::{parse_elements, read_elements_file};
pub use writer::{write_elements, write_elements_file};
