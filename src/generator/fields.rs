use crate::config::{UploadDetection, UploadRules};
use crate::dmmf::{Field, Model};
use once_cell::sync::Lazy;
use regex::Regex;

/// `@upload`, `@upload(true)` or `@upload(false)` in a field's `///` doc comment.
static UPLOAD_ANNOTATION: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"@upload(?:\(\s*(true|false)\s*\))?").ok());

/// The relation/upload partition of a model's fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFields<'a> {
    /// Fields with `kind == object`
    pub relation_fields: Vec<&'a Field>,
    /// String fields that hold the public path of an uploaded file
    pub upload_fields: Vec<&'a Field>,
}

impl ClassifiedFields<'_> {
    pub fn has_upload_fields(&self) -> bool {
        !self.upload_fields.is_empty()
    }

    pub fn has_relation_fields(&self) -> bool {
        !self.relation_fields.is_empty()
    }

    pub fn is_upload(&self, name: &str) -> bool {
        self.upload_fields.iter().any(|f| f.name == name)
    }
}

/// Explicit upload declaration on a field, if any.
///
/// `Some(true)` for `@upload`/`@upload(true)`, `Some(false)` for `@upload(false)`.
pub fn upload_annotation(field: &Field) -> Option<bool> {
    let doc = field.documentation.as_deref()?;
    let re = UPLOAD_ANNOTATION.as_ref()?;
    let caps = re.captures(doc)?;
    Some(caps.get(1).map(|m| m.as_str() != "false").unwrap_or(true))
}

/// Whether the lowercased field name contains one of the upload patterns.
pub fn matches_upload_pattern(name: &str, rules: &UploadRules) -> bool {
    let lower = name.to_lowercase();
    rules.patterns.iter().any(|p| lower.contains(p.as_str()))
}

fn is_upload_field(field: &Field, rules: &UploadRules) -> bool {
    if field.ty != "String" || field.is_relation() {
        return false;
    }
    match upload_annotation(field) {
        Some(declared) => declared,
        None => {
            rules.detection == UploadDetection::Heuristic
                && matches_upload_pattern(&field.name, rules)
        }
    }
}

/// Partition `model`'s fields into relation fields and upload fields.
///
/// Pure and order-preserving; a model without matches yields two empty lists.
pub fn classify<'a>(model: &'a Model, rules: &UploadRules) -> ClassifiedFields<'a> {
    ClassifiedFields {
        relation_fields: model.fields.iter().filter(|f| f.is_relation()).collect(),
        upload_fields: model
            .fields
            .iter()
            .filter(|f| is_upload_field(f, rules))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dmmf::FieldKind;

    fn names(fields: &[&Field]) -> Vec<String> {
        fields.iter().map(|f| f.name.clone()).collect()
    }

    fn documented(name: &str, ty: &str, doc: &str) -> Field {
        Field {
            documentation: Some(doc.to_string()),
            ..Field::scalar(name, ty)
        }
    }

    #[test]
    fn test_book_scenario() {
        let mut id = Field::scalar("id", "Int");
        id.is_generated = true;
        let book = Model::new(
            "Book",
            vec![
                id,
                Field::scalar("title", "String"),
                Field::scalar("coverImage", "String"),
                Field::relation("category", "Category"),
            ],
        );
        let classified = classify(&book, &UploadRules::default());
        assert_eq!(names(&classified.upload_fields), vec!["coverImage"]);
        assert_eq!(names(&classified.relation_fields), vec!["category"]);
        assert!(classified.has_upload_fields());
    }

    #[test]
    fn test_category_scenario() {
        let mut books = Field::relation("books", "Book");
        books.is_list = true;
        let category = Model::new(
            "Category",
            vec![Field::scalar("id", "Int"), Field::scalar("name", "String"), books],
        );
        let classified = classify(&category, &UploadRules::default());
        assert!(classified.upload_fields.is_empty());
        assert_eq!(names(&classified.relation_fields), vec!["books"]);
    }

    #[test]
    fn test_avatar_is_case_insensitive() {
        let user = Model::new(
            "User",
            vec![
                Field::scalar("userAVATAR", "String"),
                Field::scalar("profilePhoto", "String"),
                Field::scalar("paymentSlip", "String"),
            ],
        );
        let classified = classify(&user, &UploadRules::default());
        assert_eq!(
            names(&classified.upload_fields),
            vec!["userAVATAR", "profilePhoto", "paymentSlip"]
        );
    }

    #[test]
    fn test_non_string_pattern_is_ignored() {
        let model = Model::new(
            "Doc",
            vec![
                Field::scalar("fileSize", "Int"),
                Field::relation("attachments", "Attachment"),
            ],
        );
        let classified = classify(&model, &UploadRules::default());
        assert!(classified.upload_fields.is_empty());
        assert_eq!(classified.relation_fields.len(), 1);
        assert_eq!(classified.relation_fields[0].kind, FieldKind::Object);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let model = Model::new(
            "Post",
            vec![
                Field::scalar("headerImage", "String"),
                Field::relation("author", "User"),
                Field::scalar("attachment", "String"),
                Field::relation("tags", "Tag"),
            ],
        );
        let rules = UploadRules::default();
        assert_eq!(classify(&model, &rules), classify(&model, &rules));
        assert_eq!(
            names(&classify(&model, &rules).upload_fields),
            vec!["headerImage", "attachment"]
        );
    }

    #[test]
    fn test_annotation_overrides_heuristic() {
        let model = Model::new(
            "Invoice",
            vec![
                documented("pdf", "String", "Scanned invoice @upload"),
                documented("filename", "String", "Original name only @upload(false)"),
                Field::scalar("thumbnailImage", "String"),
            ],
        );
        let classified = classify(&model, &UploadRules::default());
        assert_eq!(names(&classified.upload_fields), vec!["pdf", "thumbnailImage"]);
    }

    #[test]
    fn test_annotated_mode_disables_heuristic() {
        let model = Model::new(
            "Invoice",
            vec![
                documented("pdf", "String", "@upload(true)"),
                Field::scalar("thumbnailImage", "String"),
            ],
        );
        let rules = UploadRules {
            detection: UploadDetection::Annotated,
            ..UploadRules::default()
        };
        assert_eq!(names(&classify(&model, &rules).upload_fields), vec!["pdf"]);
    }

    #[test]
    fn test_custom_patterns() {
        let rules = UploadRules {
            detection: UploadDetection::Heuristic,
            patterns: vec!["logo".into()],
        };
        assert!(matches_upload_pattern("companyLogo", &rules));
        assert!(!matches_upload_pattern("avatar", &rules));
    }

    #[test]
    fn test_upload_annotation_parsing() {
        assert_eq!(upload_annotation(&documented("a", "String", "@upload")), Some(true));
        assert_eq!(
            upload_annotation(&documented("a", "String", "x @upload( false )")),
            Some(false)
        );
        assert_eq!(upload_annotation(&Field::scalar("a", "String")), None);
    }
}
