//! Kernel metadata template rendering
//!
//! Templates are plain JSON with three literal placeholder tokens:
//! `{username}`, `{tag}`, `{date}`. Rendering is a single left-to-right
//! pass replacing every occurrence of each token, so the result does not
//! depend on replacement order even if a substituted value contains
//! another token's spelling. There is no escaping and no template logic.

use crate::core::error::{PushError, PushResult, RenderError};
use serde::{Deserialize, Serialize};

/// Placeholder token for the Kaggle account name
pub const USERNAME_TOKEN: &str = "{username}";
/// Placeholder token for the revision tag
pub const TAG_TOKEN: &str = "{tag}";
/// Placeholder token for the current date (YYYY-MM-DD)
pub const DATE_TOKEN: &str = "{date}";

/// Values substituted into a template
#[derive(Debug, Clone)]
pub struct Substitutions {
  pub username: String,
  pub tag: String,
  pub date: String,
}

impl Substitutions {
  fn pairs(&self) -> [(&'static str, &str); 3] {
    [
      (USERNAME_TOKEN, self.username.as_str()),
      (TAG_TOKEN, self.tag.as_str()),
      (DATE_TOKEN, self.date.as_str()),
    ]
  }
}

/// Rendered kernel metadata
///
/// Only `id` is interpreted by this tool; every other template field is
/// carried through untouched and written back out as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelMetadata {
  /// Kernel identifier, `<account>/<slug>` on Kaggle
  pub id: String,

  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Render a template into kernel metadata
///
/// Substitution values are checked up front: a value that would break out
/// of a JSON string is rejected instead of producing corrupt output.
pub fn render(template: &str, subs: &Substitutions) -> PushResult<KernelMetadata> {
  let pairs = subs.pairs();

  for &(token, value) in &pairs {
    check_value(token, value)?;
  }

  let rendered = substitute(template, &pairs);

  let value: serde_json::Value = serde_json::from_str(&rendered)
    .map_err(|e| PushError::Render(RenderError::Parse { message: e.to_string() }))?;

  if !value.is_object() {
    return Err(PushError::Render(RenderError::Parse {
      message: "expected a JSON object at the top level".to_string(),
    }));
  }
  if value.get("id").is_none() {
    return Err(PushError::Render(RenderError::MissingId));
  }

  let meta: KernelMetadata = serde_json::from_value(value)
    .map_err(|e| PushError::Render(RenderError::Parse { message: e.to_string() }))?;

  if meta.id.trim().is_empty() {
    return Err(PushError::Render(RenderError::MissingId));
  }

  Ok(meta)
}

/// Replace every occurrence of each token in one pass over the template
fn substitute(template: &str, pairs: &[(&'static str, &str)]) -> String {
  let mut out = String::with_capacity(template.len());
  let mut rest = template;

  'scan: while !rest.is_empty() {
    for &(token, value) in pairs {
      if let Some(tail) = rest.strip_prefix(token) {
        out.push_str(value);
        rest = tail;
        continue 'scan;
      }
    }
    match rest.chars().next() {
      Some(c) => {
        out.push(c);
        rest = &rest[c.len_utf8()..];
      }
      None => break,
    }
  }

  out
}

/// Reject values that would corrupt a JSON string context
fn check_value(token: &'static str, value: &str) -> PushResult<()> {
  if value.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
    return Err(PushError::Render(RenderError::UnsafeValue {
      placeholder: token,
      value: value.to_string(),
    }));
  }
  Ok(())
}
