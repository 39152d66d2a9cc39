//! Path string parsing.

use super::PathError;

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A named field, id, or type key.
    Field(String),
    /// A numeric index into the preceding list.
    Index(usize),
}

/// Splits `layers[0].filter[1].cutoff` into
/// `[Field(layers), Index(0), Field(filter), Index(1), Field(cutoff)]`.
pub fn parse_path(path: &str) -> Result<Vec<Segment>, PathError> {
    let malformed = || PathError::Malformed(path.to_string());
    if path.is_empty() {
        return Err(malformed());
    }

    let mut segments = Vec::new();
    for part in path.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(pos) => part.split_at(pos),
            None => (part, ""),
        };
        if name.is_empty() || name.contains(']') {
            return Err(malformed());
        }
        segments.push(Segment::Field(name.to_string()));

        // `rest` is empty or starts with '['
        while !rest.is_empty() {
            let close = rest.find(']').ok_or_else(malformed)?;
            let index = rest[1..close].parse::<usize>().map_err(|_| malformed())?;
            segments.push(Segment::Index(index));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(malformed());
            }
        }
    }
    Ok(segments)
}
