use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::label::{Enumeration, Id};
use crate::normalization::normalize_text;
use crate::registry::{Entity, Registry, Slots};
use crate::validation::{
    is_absent, is_non_empty_string, mandatory_positive_id, positive_id, ValidationResult,
    Violation,
};

const PERSON_ID_REQUIRED: &str = "A positive integer value for the person ID is required!";
const PERSON_ID_INVALID: &str = "The person ID must be a positive integer!";

/// The part a person plays in making movies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Director,
    Actor,
}

impl Enumeration for Role {
    const VALUES: &'static [Self] = &[Role::Director, Role::Actor];

    fn name(self) -> &'static str {
        match self {
            Role::Director => "director",
            Role::Actor => "actor",
        }
    }
}

/// A person who directs or acts in movies.
///
/// The movies a person directed or played in are not stored here;
/// they are derived from the movies referencing the person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// The unique ID. Immutable once created.
    person_id: Id,

    /// The normalized name.
    name: String,

    /// The roles taken on. Never empty.
    role: BTreeSet<Role>,

    /// The ID of the person's agent, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    agent: Option<Id>,
}

impl Person {
    /// Creates a person from raw slots, checking `personId`, `name`,
    /// `role` and `agent` in that order.
    pub fn from_slots(slots: &Slots, persons: &Registry<Person>) -> ValidationResult<Self> {
        let person_id = check_person_id_as_id(slots.get("personId"), persons)?;
        let name = check_name(slots.get("name"))?;
        let role = check_role(slots.get("role"))?;
        let agent = check_agent(slots.get("agent"))?;

        Ok(Person {
            person_id,
            name,
            role,
            agent,
        })
    }

    /// Computes the person resulting from applying the fields present
    /// in `slots`, along with the names of the fields that changed.
    /// `self` is left untouched.
    pub fn updated(&self, slots: &Slots) -> ValidationResult<(Person, Vec<&'static str>)> {
        let mut next = self.clone();
        let mut changed = vec![];

        if let Some(name) = slots.get("name") {
            let name = check_name(Some(name))?;

            if name != next.name {
                next.name = name;
                changed.push("name");
            }
        }

        if let Some(role) = slots.get("role") {
            let role = check_role(Some(role))?;

            if role != next.role {
                next.role = role;
                changed.push("role");
            }
        }

        if slots.contains_key("agent") {
            let agent = check_agent(slots.get("agent"))?;

            if agent != next.agent {
                next.agent = agent;
                changed.push("agent");
            }
        }

        Ok((next, changed))
    }

    pub fn person_id(&self) -> Id {
        self.person_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.role
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role.contains(&role)
    }

    pub fn agent(&self) -> Option<Id> {
        self.agent
    }
}

impl Entity for Person {
    const NAME: &'static str = "person";

    fn id(&self) -> Id {
        self.person_id
    }
}

/// Checks that `id` is a positive integer.
pub fn check_person_id(id: Option<&Value>) -> ValidationResult<Id> {
    mandatory_positive_id(id, PERSON_ID_REQUIRED, PERSON_ID_INVALID)
}

/// Checks that `id` is a valid person ID not yet in use.
pub fn check_person_id_as_id(id: Option<&Value>, persons: &Registry<Person>) -> ValidationResult<Id> {
    let id = check_person_id(id)?;

    if persons.contains(id) {
        return Err(Violation::Uniqueness(format!(
            "There is already a person record with the person ID {}!",
            id
        )));
    }

    Ok(id)
}

/// Checks that `id` is a valid person ID naming an existing person.
pub fn check_person_id_as_id_ref(
    id: Option<&Value>,
    persons: &Registry<Person>,
) -> ValidationResult<Id> {
    let id = check_person_id(id)?;

    if !persons.contains(id) {
        return Err(Violation::ReferentialIntegrity(format!(
            "There is no person with the person ID {}!",
            id
        )));
    }

    Ok(id)
}

pub fn check_name(name: Option<&Value>) -> ValidationResult<String> {
    match name {
        _ if is_absent(name) => Err(Violation::MandatoryValue(
            "A person's name is required!".to_owned(),
        )),
        Some(name) if is_non_empty_string(name) => {
            Ok(name.as_str().map(normalize_text).unwrap_or_default())
        }
        _ => Err(Violation::Range(
            "The name of a person must be a non-empty string!".to_owned(),
        )),
    }
}

/// Checks a role or list of roles, each given by name or 1-based
/// index. At least one role is required.
pub fn check_role(role: Option<&Value>) -> ValidationResult<BTreeSet<Role>> {
    let values = match role {
        None | Some(Value::Null) => vec![],
        Some(Value::Array(values)) => values.iter().collect(),
        Some(value) => vec![value],
    };

    if values.is_empty() {
        return Err(Violation::MandatoryValue("No role defined!".to_owned()));
    }

    values
        .into_iter()
        .map(|v| {
            Role::from_value(v)
                .ok_or_else(|| Violation::Range(format!("Invalid value for role: {}", v)))
        })
        .collect()
}

/// Checks an optional agent ID. An empty string counts as absent.
pub fn check_agent(agent: Option<&Value>) -> ValidationResult<Option<Id>> {
    match agent {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(agent) => positive_id(agent, "The agent number must be a positive integer!").map(Some),
    }
}
