pub mod document;
pub mod list;

pub use document::{
    Basics, Certification, CoverTone, Document, Education, Experience, LanguageSkill, Link,
    ListKind, OutputLanguage, Project, Resume, TemplateStyle,
};
pub use list::{IndexedList, ListError};
