//! Payload validation for collection entries
//!
//! Three schemas share one set of field rules:
//! - [`InsertSchema`]: create payload, all fields required except `notes`
//! - [`UpdateSchema`]: partial update, every field optional, `{}` is valid
//! - [`FullEntrySchema`]: insert fields plus `id`, applied to the merged
//!   record after an update so the stored state never violates the base rules
//!
//! Validation never stops at the first problem: every offending field is
//! reported.

use chrono::DateTime;
use pokebox_core::{CollectionEntry, EntryPatch, FieldErrors, NewEntry};
use serde_json::{Map, Value};

pub const FIELD_ID: &str = "id";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_NOTES: &str = "notes";
pub const FIELD_POKEMON_ID: &str = "pokemonId";

pub const MIN_LEVEL: i64 = 1;
pub const MAX_LEVEL: i64 = 100;

const ENTRY_FIELDS: [&str; 5] = [
    FIELD_CREATED_AT,
    FIELD_LEVEL,
    FIELD_LOCATION,
    FIELD_NOTES,
    FIELD_POKEMON_ID,
];

/// Declarative payload validator
pub trait Schema {
    /// Typed result of a successful validation
    type Output;

    /// Validate a JSON payload, collecting every field error
    fn validate(&self, payload: &Value) -> Result<Self::Output, FieldErrors>;
}

/// Create payload schema
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertSchema;

/// Partial update schema
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateSchema;

/// Complete stored entry schema
#[derive(Debug, Clone, Copy, Default)]
pub struct FullEntrySchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

/// Reads fields off a JSON object, recording problems as it goes
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    /// Payload must be an object with no fields outside `known`
    fn open(payload: &'a Value, known: &[&str]) -> Result<Self, FieldErrors> {
        let Some(object) = payload.as_object() else {
            let mut errors = FieldErrors::new();
            errors.push("", "expected a JSON object");
            return Err(errors);
        };

        let mut errors = FieldErrors::new();
        for key in object.keys() {
            if !known.contains(&key.as_str()) {
                errors.push(key.as_str(), "unknown field");
            }
        }
        Ok(Self { object, errors })
    }

    fn take(&mut self, field: &str, presence: Presence) -> Option<&'a Value> {
        match self.object.get(field) {
            Some(value) => Some(value),
            None => {
                if presence == Presence::Required {
                    self.errors.push(field, "required");
                }
                None
            }
        }
    }

    fn string(&mut self, field: &str, presence: Presence) -> Option<String> {
        let value = self.take(field, presence)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.errors.push(field, format!("expected a string, got {}", kind(value)));
                None
            }
        }
    }

    fn non_empty_string(&mut self, field: &str, presence: Presence) -> Option<String> {
        let value = self.string(field, presence)?;
        if value.is_empty() {
            self.errors.push(field, "must not be empty");
            return None;
        }
        Some(value)
    }

    fn datetime(&mut self, field: &str, presence: Presence) -> Option<String> {
        let value = self.string(field, presence)?;
        if let Err(e) = DateTime::parse_from_rfc3339(&value) {
            self.errors
                .push(field, format!("expected an ISO-8601 datetime: {e}"));
            return None;
        }
        Some(value)
    }

    fn integer_in(&mut self, field: &str, presence: Presence, min: i64, max: i64) -> Option<i64> {
        let value = self.take(field, presence)?;
        let Some(n) = value.as_i64() else {
            let found = if value.is_number() { "a non-integer number" } else { kind(value) };
            self.errors
                .push(field, format!("expected an integer, got {found}"));
            return None;
        };
        if n < min {
            self.errors.push(field, format!("must be at least {min}"));
            return None;
        }
        if n > max {
            self.errors.push(field, format!("must be at most {max}"));
            return None;
        }
        Some(n)
    }

    fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The five entry fields as read, each `None` if absent or invalid
struct EntryFields {
    created_at: Option<String>,
    level: Option<u8>,
    location: Option<String>,
    notes: Option<String>,
    pokemon_id: Option<u32>,
}

fn read_entry_fields(reader: &mut FieldReader<'_>, presence: Presence) -> EntryFields {
    EntryFields {
        created_at: reader.datetime(FIELD_CREATED_AT, presence),
        level: reader
            .integer_in(FIELD_LEVEL, presence, MIN_LEVEL, MAX_LEVEL)
            .and_then(|n| u8::try_from(n).ok()),
        location: reader.non_empty_string(FIELD_LOCATION, presence),
        notes: reader.string(FIELD_NOTES, Presence::Optional),
        pokemon_id: reader
            .integer_in(FIELD_POKEMON_ID, presence, 1, i64::from(u32::MAX))
            .and_then(|n| u32::try_from(n).ok()),
    }
}

impl Schema for InsertSchema {
    type Output = NewEntry;

    fn validate(&self, payload: &Value) -> Result<NewEntry, FieldErrors> {
        let mut reader = FieldReader::open(payload, &ENTRY_FIELDS)?;
        let fields = read_entry_fields(&mut reader, Presence::Required);
        let errors = reader.into_errors();

        match fields {
            EntryFields {
                created_at: Some(created_at),
                level: Some(level),
                location: Some(location),
                notes,
                pokemon_id: Some(pokemon_id),
            } if errors.is_empty() => Ok(NewEntry {
                created_at,
                level,
                location,
                notes,
                pokemon_id,
            }),
            _ => Err(errors),
        }
    }
}

impl Schema for UpdateSchema {
    type Output = EntryPatch;

    fn validate(&self, payload: &Value) -> Result<EntryPatch, FieldErrors> {
        let mut reader = FieldReader::open(payload, &ENTRY_FIELDS)?;
        let fields = read_entry_fields(&mut reader, Presence::Optional);
        reader.into_errors().into_result()?;

        Ok(EntryPatch {
            created_at: fields.created_at,
            level: fields.level,
            location: fields.location,
            notes: fields.notes,
            pokemon_id: fields.pokemon_id,
        })
    }
}

impl Schema for FullEntrySchema {
    type Output = CollectionEntry;

    fn validate(&self, payload: &Value) -> Result<CollectionEntry, FieldErrors> {
        let mut known = ENTRY_FIELDS.to_vec();
        known.push(FIELD_ID);

        let mut reader = FieldReader::open(payload, &known)?;
        let id = reader.non_empty_string(FIELD_ID, Presence::Required);
        let fields = read_entry_fields(&mut reader, Presence::Required);
        let errors = reader.into_errors();

        match (id, fields) {
            (
                Some(id),
                EntryFields {
                    created_at: Some(created_at),
                    level: Some(level),
                    location: Some(location),
                    notes,
                    pokemon_id: Some(pokemon_id),
                },
            ) if errors.is_empty() => Ok(NewEntry {
                created_at,
                level,
                location,
                notes,
                pokemon_id,
            }
            .into_entry(id)),
            _ => Err(errors),
        }
    }
}
