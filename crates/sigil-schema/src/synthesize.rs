//! Signature to schema synthesis.
//!
//! [`describe`] derives the parameter descriptors of a class, [`synthesize`]
//! turns them into a [`Schema`] with a trailing `_target_` field.
//!
//! Unions the target format cannot represent are narrowed, never rejected:
//!
//! | declared                       | field type         |
//! |--------------------------------|--------------------|
//! | (none)                         | `Any`              |
//! | `Union[A, B, ...]` (no `None`) | `Any`              |
//! | `Optional[T]`                  | `Optional[T]`      |
//! | `Union[A, B, ..., None]`       | `Optional[Any]`    |
//! | `T`                            | `T`                |

use sigil_core::{Annotation, ClassDescriptor};

use crate::error::SchemaError;
use crate::field::{FieldDefault, FieldSpec, FieldType};
use crate::schema::{Schema, TARGET_FIELD};

/// Receiver and variadic catch-all names that never become fields.
pub const SKIPPED_PARAMETERS: [&str; 3] = ["self", "args", "kwargs"];

/// Narrow a declared annotation to a representable field type.
#[must_use]
pub fn narrow(annotation: Option<&Annotation>) -> FieldType {
    let Some(annotation) = annotation else {
        return FieldType::Any;
    };

    match annotation {
        Annotation::Any => FieldType::Any,
        Annotation::None => FieldType::NoneType,
        Annotation::Named(name) => FieldType::Named(name.clone()),
        Annotation::Union(members) => {
            // Unions built by hand may not be normalized yet.
            let normalized = Annotation::union(members.iter().cloned());
            let Some(members) = normalized.union_members() else {
                return narrow(Some(&normalized));
            };

            let concrete: Vec<&Annotation> = members
                .iter()
                .filter(|member| **member != Annotation::None)
                .collect();

            match concrete.as_slice() {
                _ if concrete.len() == members.len() => FieldType::Any,
                [single] => FieldType::optional(narrow(Some(*single))),
                _ => FieldType::optional(FieldType::Any),
            }
        }
    }
}

/// Parameter descriptors for a class, in declaration order.
///
/// Parameters named `self`, `args` or `kwargs` are skipped.
#[must_use]
pub fn describe(class: &ClassDescriptor) -> Vec<FieldSpec> {
    class
        .parameters()
        .iter()
        .filter(|param| !SKIPPED_PARAMETERS.contains(&param.name.as_str()))
        .map(|param| {
            FieldSpec::new(
                param.name.clone(),
                narrow(param.annotation.as_ref()),
                FieldDefault::from_declared(param.default.as_ref()),
            )
        })
        .collect()
}

/// Build the config schema for a class.
///
/// The schema is named after the class's qualified name and ends with
/// `_target_: str = "<module>.<qualname>"`. A class without a constructor, or
/// whose constructor only declares skipped parameters, yields a schema with
/// `_target_` alone.
///
/// # Errors
///
/// Returns `SchemaError::MalformedClass` if the module or qualified name is
/// empty, or `SchemaError::DuplicateField` if the constructor repeats a
/// parameter name or declares a parameter named `_target_`.
pub fn synthesize(class: &ClassDescriptor) -> Result<Schema, SchemaError> {
    if class.module.trim().is_empty() || class.qualname.trim().is_empty() {
        return Err(SchemaError::MalformedClass {
            class: class.path(),
            reason: "module and qualified name must be non-empty".to_string(),
        });
    }

    let path = class.path();
    let schema = Schema::builder(class.qualname.clone())
        .fields(describe(class))
        .field(FieldSpec::new(
            TARGET_FIELD,
            FieldType::named("str"),
            FieldDefault::Value(serde_json::Value::String(path.clone())),
        ))
        .build()?;

    tracing::debug!(class = %path, fields = schema.fields().len(), "synthesized schema");
    Ok(schema)
}
