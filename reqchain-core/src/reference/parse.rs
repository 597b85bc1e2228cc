use super::ReferenceError;

/// A parsed `<id>.response.<path>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: String,
    pub segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field access: `name`.
    Field(String),
    /// Array element access on an array-valued field: `name[n]`.
    Index { field: String, index: usize },
}

/// Parse the text captured between `{{` and `}}` into a typed reference.
///
/// The shape is `<id>.response.<segment>[.<segment>...]`: at least three
/// dot-separated parts, with `response` matched case-insensitively.
pub fn parse_reference(raw: &str) -> Result<Reference, ReferenceError> {
    let invalid = || ReferenceError::InvalidSyntax {
        reference: raw.to_string(),
    };

    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() < 3 {
        return Err(invalid());
    }
    if parts[0].is_empty() {
        return Err(invalid());
    }
    if !parts[1].eq_ignore_ascii_case("response") {
        return Err(invalid());
    }

    let mut segments = Vec::with_capacity(parts.len() - 2);
    for part in &parts[2..] {
        segments.push(parse_segment(raw, part)?);
    }

    Ok(Reference {
        id: parts[0].to_string(),
        segments,
    })
}

fn parse_segment(raw: &str, part: &str) -> Result<PathSegment, ReferenceError> {
    if part.is_empty() {
        return Err(ReferenceError::InvalidSyntax {
            reference: raw.to_string(),
        });
    }

    let Some(open) = part.find('[') else {
        return Ok(PathSegment::Field(part.to_string()));
    };

    // Indexed form: the bracket pair must close the segment and follow a
    // non-empty field name.
    if open == 0 || !part.ends_with(']') {
        return Err(ReferenceError::InvalidSyntax {
            reference: raw.to_string(),
        });
    }

    let field = &part[..open];
    let index = part[open + 1..part.len() - 1].parse::<usize>().map_err(|_| {
        ReferenceError::InvalidArrayIndex {
            reference: raw.to_string(),
            segment: part.to_string(),
        }
    })?;

    Ok(PathSegment::Index {
        field: field.to_string(),
        index,
    })
}
