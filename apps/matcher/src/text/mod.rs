// Text preparation: OCR artifact repair, stop words, and the pluggable linguistic annotator.

pub mod annotator;
pub mod normalizer;
pub mod stopwords;

pub use annotator::{
    AnnotatedToken, Annotator, AnnotatorCapability, HeuristicAnnotator, PartOfSpeech,
};
pub use normalizer::normalize;
