use std::collections::BTreeSet;

use serde::{Serialize, Serializer};
use serde_json::Value;
use time::format_description::FormatItem;
use time::macros::{date, format_description};
use time::Date;

use crate::label::{Enumeration, Id};
use crate::normalization::normalize_text;
use crate::person::{check_person_id, check_person_id_as_id_ref, Person};
use crate::registry::{Entity, Registry, Slots};
use crate::validation::{
    is_absent, is_non_empty_string, mandatory_positive_id, positive_id, ValidationResult,
    Violation,
};

/// The longest title accepted, in characters.
pub const MAX_TITLE_LENGTH: usize = 120;

/// The day of the first public film screening. No movie can be
/// released before it.
pub const EARLIEST_RELEASE_DATE: Date = date!(1895 - 12 - 28);

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

const MOVIE_ID_REQUIRED: &str = "A movie ID must be provided!";
const MOVIE_ID_INVALID: &str = "The movie ID must be a positive integer!";

/// The special kinds of movie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    TvSeriesEpisode,
    Biography,
}

impl Enumeration for Category {
    const VALUES: &'static [Self] = &[Category::TvSeriesEpisode, Category::Biography];

    fn name(self) -> &'static str {
        match self {
            Category::TvSeriesEpisode => "tvSeriesEpisode",
            Category::Biography => "biography",
        }
    }
}

/// The attributes specific to each kind of movie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovieKind {
    /// A movie with no special category.
    Base,

    /// An episode of a TV series.
    TvSeriesEpisode {
        tv_series_name: String,
        episode_no: Option<Id>,
    },

    /// A movie about the life of a person.
    Biography { about: Id },
}

impl MovieKind {
    pub fn category(&self) -> Option<Category> {
        match self {
            MovieKind::Base => None,
            MovieKind::TvSeriesEpisode { .. } => Some(Category::TvSeriesEpisode),
            MovieKind::Biography { .. } => Some(Category::Biography),
        }
    }
}

/// A movie, possibly of a special kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    movie_id: Id,
    title: String,
    release_date: Option<Date>,
    director: Option<Id>,
    actors: BTreeSet<Id>,
    kind: MovieKind,
}

/// The flat persisted form of a movie.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MovieRecord<'a> {
    movie_id: Id,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    director: Option<Id>,
    actors: &'a BTreeSet<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tv_series_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episode_no: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    about: Option<Id>,
}

impl Movie {
    /// Creates a movie from raw slots. The common attributes are
    /// checked first, then `category`, then the attributes that
    /// depend on it.
    pub fn from_slots(
        slots: &Slots,
        movies: &Registry<Movie>,
        persons: &Registry<Person>,
    ) -> ValidationResult<Self> {
        let movie_id = check_movie_id_as_id(slots.get("movieId"), movies)?;
        let title = check_title(slots.get("title"))?;
        let release_date = check_release_date(slots.get("releaseDate"))?;
        let director = check_director(slots.get("director"), persons)?;
        let actors = check_actors(slots.get("actors"), persons)?;
        let category = check_category(slots.get("category"))?;

        let tv_series_name = check_tv_series_name(slots.get("tvSeriesName"), category)?;
        let episode_no = check_episode_no(slots.get("episodeNo"), category)?;
        let about = check_about(slots.get("about"), category, persons)?;

        let kind = match (tv_series_name, about) {
            (Some(tv_series_name), _) => MovieKind::TvSeriesEpisode {
                tv_series_name,
                episode_no,
            },
            (None, Some(about)) => MovieKind::Biography { about },
            (None, None) => MovieKind::Base,
        };

        Ok(Movie {
            movie_id,
            title,
            release_date,
            director,
            actors,
            kind,
        })
    }

    /// Computes the movie resulting from applying the fields present
    /// in `slots`, along with the names of the fields that changed.
    /// The category of a movie cannot change.
    pub fn updated(
        &self,
        slots: &Slots,
        persons: &Registry<Person>,
    ) -> ValidationResult<(Movie, Vec<&'static str>)> {
        let mut next = self.clone();
        let mut changed = vec![];

        if slots.contains_key("category") {
            let category = check_category(slots.get("category"))?;

            if category != self.category() {
                return Err(Violation::Constraint(
                    "The category of a movie cannot be changed!".to_owned(),
                ));
            }
        }

        if let Some(title) = slots.get("title") {
            let title = check_title(Some(title))?;

            if title != next.title {
                next.title = title;
                changed.push("title");
            }
        }

        if slots.contains_key("releaseDate") {
            let release_date = check_release_date(slots.get("releaseDate"))?;

            if release_date != next.release_date {
                next.release_date = release_date;
                changed.push("releaseDate");
            }
        }

        if slots.contains_key("director") {
            let director = check_director(slots.get("director"), persons)?;

            if director != next.director {
                next.director = director;
                changed.push("director");
            }
        }

        let mut actors = next.actors.clone();

        if slots.contains_key("actors") {
            actors = check_actors(slots.get("actors"), persons)?;
        }

        if slots.contains_key("actorIdRefsToAdd") {
            actors.extend(check_actors(slots.get("actorIdRefsToAdd"), persons)?);
        }

        if let Some(removed) = slots.get("actorIdRefsToRemove") {
            for id in id_refs(removed)? {
                actors.remove(&check_person_id(Some(&id))?);
            }
        }

        if actors != next.actors {
            next.actors = actors;
            changed.push("actors");
        }

        let category = self.category();

        match &mut next.kind {
            MovieKind::TvSeriesEpisode {
                tv_series_name,
                episode_no,
            } => {
                if let Some(name) = slots.get("tvSeriesName") {
                    if let Some(name) = check_tv_series_name(Some(name), category)? {
                        if name != *tv_series_name {
                            *tv_series_name = name;
                            changed.push("tvSeriesName");
                        }
                    }
                }

                if slots.contains_key("episodeNo") {
                    let number = check_episode_no(slots.get("episodeNo"), category)?;

                    if number != *episode_no {
                        *episode_no = number;
                        changed.push("episodeNo");
                    }
                }
            }
            MovieKind::Biography { about } => {
                if let Some(subject) = slots.get("about") {
                    if let Some(subject) = check_about(Some(subject), category, persons)? {
                        if subject != *about {
                            *about = subject;
                            changed.push("about");
                        }
                    }
                }
            }
            MovieKind::Base => {
                check_tv_series_name(slots.get("tvSeriesName"), category)?;
                check_episode_no(slots.get("episodeNo"), category)?;
                check_about(slots.get("about"), category, persons)?;
            }
        }

        Ok((next, changed))
    }

    /// Returns this movie with every reference to `person_id` dropped,
    /// or `None` if the movie is a biography of that person and cannot
    /// exist without it.
    pub(crate) fn without_person(&self, person_id: Id) -> Option<Movie> {
        if self.kind == (MovieKind::Biography { about: person_id }) {
            return None;
        }

        let mut next = self.clone();

        if next.director == Some(person_id) {
            next.director = None;
        }

        next.actors.remove(&person_id);

        Some(next)
    }

    pub fn references(&self, person_id: Id) -> bool {
        self.director == Some(person_id)
            || self.actors.contains(&person_id)
            || self.kind == (MovieKind::Biography { about: person_id })
    }

    pub fn movie_id(&self) -> Id {
        self.movie_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn release_date(&self) -> Option<Date> {
        self.release_date
    }

    pub fn director(&self) -> Option<Id> {
        self.director
    }

    pub fn actors(&self) -> &BTreeSet<Id> {
        &self.actors
    }

    pub fn kind(&self) -> &MovieKind {
        &self.kind
    }

    pub fn category(&self) -> Option<Category> {
        self.kind.category()
    }

    pub fn is_tv_series_episode(&self) -> bool {
        self.category() == Some(Category::TvSeriesEpisode)
    }

    fn record(&self) -> Result<MovieRecord<'_>, time::error::Format> {
        let release_date = self
            .release_date
            .map(|d| d.format(DATE_FORMAT))
            .transpose()?;

        let (tv_series_name, episode_no, about) = match &self.kind {
            MovieKind::Base => (None, None, None),
            MovieKind::TvSeriesEpisode {
                tv_series_name,
                episode_no,
            } => (Some(tv_series_name.as_str()), *episode_no, None),
            MovieKind::Biography { about } => (None, None, Some(*about)),
        };

        Ok(MovieRecord {
            movie_id: self.movie_id,
            title: &self.title,
            release_date,
            director: self.director,
            actors: &self.actors,
            category: self.category(),
            tv_series_name,
            episode_no,
            about,
        })
    }
}

impl Serialize for Movie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error;

        self.record()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl Entity for Movie {
    const NAME: &'static str = "movie";

    fn id(&self) -> Id {
        self.movie_id
    }
}

/// Checks that `id` is a positive integer or integer string.
pub fn check_movie_id(id: Option<&Value>) -> ValidationResult<Id> {
    mandatory_positive_id(id, MOVIE_ID_REQUIRED, MOVIE_ID_INVALID)
}

/// Checks that `id` is a valid movie ID not used by any kind of movie.
pub fn check_movie_id_as_id(id: Option<&Value>, movies: &Registry<Movie>) -> ValidationResult<Id> {
    let id = check_movie_id(id)?;

    if movies.contains(id) {
        return Err(Violation::Uniqueness(format!(
            "There is already a movie with the movie ID {}!",
            id
        )));
    }

    Ok(id)
}

/// Checks that `id` is a valid movie ID naming an existing movie.
pub fn check_movie_id_as_id_ref(
    id: Option<&Value>,
    movies: &Registry<Movie>,
) -> ValidationResult<Id> {
    let id = check_movie_id(id)?;

    if !movies.contains(id) {
        return Err(Violation::ReferentialIntegrity(format!(
            "There is no movie with the movie ID {}!",
            id
        )));
    }

    Ok(id)
}

pub fn check_title(title: Option<&Value>) -> ValidationResult<String> {
    let title = match title {
        _ if is_absent(title) => {
            return Err(Violation::MandatoryValue("A title is required!".to_owned()))
        }
        Some(title) if is_non_empty_string(title) => {
            title.as_str().map(normalize_text).unwrap_or_default()
        }
        _ => {
            return Err(Violation::Range(
                "The title must be a non-empty string!".to_owned(),
            ))
        }
    };

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(Violation::StringLength(format!(
            "The title must be at most {} characters long!",
            MAX_TITLE_LENGTH
        )));
    }

    Ok(title)
}

/// Checks an optional `YYYY-MM-DD` release date. An empty string
/// counts as absent.
pub fn check_release_date(date: Option<&Value>) -> ValidationResult<Option<Date>> {
    let text = match date {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim(),
        Some(other) => {
            return Err(Violation::Range(format!(
                "The release date must be a date string, not {}!",
                other
            )))
        }
    };

    let date = Date::parse(text, DATE_FORMAT).map_err(|_| {
        Violation::Range(format!(
            "The release date {:?} is not a valid YYYY-MM-DD date!",
            text
        ))
    })?;

    if date < EARLIEST_RELEASE_DATE {
        return Err(Violation::Range(
            "The release date must be greater than or equal to 1895-12-28!".to_owned(),
        ));
    }

    Ok(Some(date))
}

/// Checks an optional reference to the person who directed a movie.
pub fn check_director(
    director: Option<&Value>,
    persons: &Registry<Person>,
) -> ValidationResult<Option<Id>> {
    match director {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(director) => check_person_id_as_id_ref(Some(director), persons).map(Some),
    }
}

/// Checks a single reference to a person acting in a movie.
pub fn check_actor(actor: &Value, persons: &Registry<Person>) -> ValidationResult<Id> {
    check_person_id_as_id_ref(Some(actor), persons)
}

/// Checks a set of actor references, given either as a list or as a
/// comma-separated string of IDs.
pub fn check_actors(
    actors: Option<&Value>,
    persons: &Registry<Person>,
) -> ValidationResult<BTreeSet<Id>> {
    match actors {
        None | Some(Value::Null) => Ok(BTreeSet::new()),
        Some(actors) => id_refs(actors)?
            .iter()
            .map(|a| check_actor(a, persons))
            .collect(),
    }
}

/// Splits a list of ID references into its elements.
fn id_refs(refs: &Value) -> ValidationResult<Vec<Value>> {
    match refs {
        Value::Array(refs) => Ok(refs.clone()),
        Value::String(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_owned()))
            .collect()),
        Value::Number(_) => Ok(vec![refs.clone()]),
        other => Err(Violation::Range(format!(
            "Invalid list of person ID references: {}",
            other
        ))),
    }
}

/// Checks an optional category, given by name or 1-based index.
pub fn check_category(category: Option<&Value>) -> ValidationResult<Option<Category>> {
    match category {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(category) => Category::from_value(category)
            .map(Some)
            .ok_or_else(|| Violation::Range(format!("Invalid value for category: {}", category))),
    }
}

/// Checks the series name, which TV series episodes must have and no
/// other movie may have.
pub fn check_tv_series_name(
    name: Option<&Value>,
    category: Option<Category>,
) -> ValidationResult<Option<String>> {
    match (category, name) {
        (Some(Category::TvSeriesEpisode), name) if is_absent(name) => Err(
            Violation::MandatoryValue("A TV series name must be provided!".to_owned()),
        ),
        (Some(Category::TvSeriesEpisode), Some(name)) => match name.as_str() {
            Some(s) if is_non_empty_string(name) => Ok(Some(normalize_text(s))),
            _ => Err(Violation::Range(
                "The TV series name must be a non-empty string!".to_owned(),
            )),
        },
        (_, name) if is_absent(name) => Ok(None),
        _ => Err(Violation::Constraint(
            "A TV series name must not be provided if the movie is not a TV series episode!"
                .to_owned(),
        )),
    }
}

/// Checks the optional episode number of a TV series episode.
pub fn check_episode_no(
    number: Option<&Value>,
    category: Option<Category>,
) -> ValidationResult<Option<Id>> {
    if is_absent(number) {
        return Ok(None);
    }

    match (category, number) {
        (Some(Category::TvSeriesEpisode), Some(number)) => {
            positive_id(number, "The episode number must be a positive integer!").map(Some)
        }
        _ => Err(Violation::Constraint(
            "An episode number must not be provided if the movie is not a TV series episode!"
                .to_owned(),
        )),
    }
}

/// Checks the subject of a biography, which biographies must have and
/// no other movie may have.
pub fn check_about(
    about: Option<&Value>,
    category: Option<Category>,
    persons: &Registry<Person>,
) -> ValidationResult<Option<Id>> {
    match (category, about) {
        (Some(Category::Biography), about) if is_absent(about) => Err(
            Violation::MandatoryValue("A biography must say which person it is about!".to_owned()),
        ),
        (Some(Category::Biography), about) => check_person_id_as_id_ref(about, persons).map(Some),
        (_, about) if is_absent(about) => Ok(None),
        _ => Err(Violation::Constraint(
            "The subject must not be provided if the movie is not a biography!".to_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::registry::slots_from_value;

    fn slots(value: Value) -> Slots {
        slots_from_value(value).expect("slots are an object")
    }

    fn persons() -> Registry<Person> {
        let mut persons = Registry::new();

        for (id, name) in &[(3, "Quentin Tarantino"), (5, "John Travolta"), (6, "Ewan McGregor"), (14, "John Forbes Nash")] {
            let person = Person::from_slots(
                &slots(json!({ "personId": id, "name": name, "role": ["director", "actor"] })),
                &persons,
            )
            .expect("create person");
            persons.insert(person);
        }

        persons
    }

    fn pulp_fiction(persons: &Registry<Person>) -> Movie {
        Movie::from_slots(
            &slots(json!({
                "movieId": "1",
                "title": "Pulp Fiction",
                "releaseDate": "1994-05-12",
                "director": "3",
                "actors": "3, 5, 6",
            })),
            &Registry::new(),
            persons,
        )
        .expect("create Pulp Fiction")
    }

    #[test]
    fn creates_movie_from_slots() {
        let movie = pulp_fiction(&persons());

        assert_eq!(movie.movie_id(), 1);
        assert_eq!(movie.title(), "Pulp Fiction");
        assert_eq!(movie.release_date(), Some(date!(1994 - 05 - 12)));
        assert_eq!(movie.director(), Some(3));
        assert_eq!(movie.actors().iter().copied().collect::<Vec<_>>(), vec![3, 5, 6]);
        assert_eq!(movie.kind(), &MovieKind::Base);
    }

    #[test]
    fn titles_are_checked() {
        assert!(matches!(check_title(None), Err(Violation::MandatoryValue(_))));
        assert!(matches!(check_title(Some(&json!(""))), Err(Violation::Range(_))));
        assert!(matches!(check_title(Some(&json!(2015))), Err(Violation::Range(_))));

        let longest = "x".repeat(MAX_TITLE_LENGTH);
        assert_eq!(check_title(Some(&json!(longest))), Ok(longest.clone()));

        let too_long = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(matches!(check_title(Some(&json!(too_long))), Err(Violation::StringLength(_))));
    }

    #[test]
    fn release_dates_start_with_cinema() {
        assert_eq!(check_release_date(None), Ok(None));
        assert_eq!(check_release_date(Some(&json!(""))), Ok(None));
        assert_eq!(
            check_release_date(Some(&json!("1895-12-28"))),
            Ok(Some(EARLIEST_RELEASE_DATE))
        );

        for invalid in &[json!("1895-12-27"), json!("1994-5-12"), json!("yesterday"), json!(1994)] {
            assert!(
                matches!(check_release_date(Some(invalid)), Err(Violation::Range(_))),
                "{}",
                invalid
            );
        }
    }

    #[test]
    fn references_must_name_existing_persons() {
        let persons = persons();

        assert_eq!(check_director(None, &persons), Ok(None));
        assert_eq!(check_director(Some(&json!(3)), &persons), Ok(Some(3)));
        assert!(matches!(
            check_director(Some(&json!(4)), &persons),
            Err(Violation::ReferentialIntegrity(_))
        ));
        assert!(matches!(
            check_actors(Some(&json!([3, 4])), &persons),
            Err(Violation::ReferentialIntegrity(_))
        ));
        assert!(matches!(
            check_actors(Some(&json!({ "3": 3 })), &persons),
            Err(Violation::Range(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let persons = persons();
        let mut movies = Registry::new();
        movies.insert(pulp_fiction(&persons));

        let result = Movie::from_slots(
            &slots(json!({ "movieId": 1, "title": "Star Wars" })),
            &movies,
            &persons,
        );

        assert!(matches!(result, Err(Violation::Uniqueness(_))));
        assert_eq!(check_movie_id_as_id_ref(Some(&json!("1")), &movies), Ok(1));
        assert!(matches!(
            check_movie_id_as_id_ref(Some(&json!(2)), &movies),
            Err(Violation::ReferentialIntegrity(_))
        ));
    }

    #[test]
    fn episodes_need_a_series_name() {
        let persons = persons();

        let missing = Movie::from_slots(
            &slots(json!({ "movieId": 4, "title": "2015", "category": "tvSeriesEpisode" })),
            &Registry::new(),
            &persons,
        );
        assert!(matches!(missing, Err(Violation::MandatoryValue(_))));

        let episode = Movie::from_slots(
            &slots(json!({
                "movieId": 4,
                "title": "2015",
                "category": 1,
                "tvSeriesName": "The Loudest Voice",
                "episodeNo": "6",
            })),
            &Registry::new(),
            &persons,
        )
        .expect("create episode");

        assert!(episode.is_tv_series_episode());
        assert_eq!(
            episode.kind(),
            &MovieKind::TvSeriesEpisode {
                tv_series_name: "The Loudest Voice".to_owned(),
                episode_no: Some(6),
            }
        );
    }

    #[test]
    fn variant_attributes_do_not_apply_elsewhere() {
        let persons = persons();

        for extra in &[json!({ "tvSeriesName": "Fargo" }), json!({ "episodeNo": 2 }), json!({ "about": 14 })] {
            let mut record = slots(json!({ "movieId": 7, "title": "Stay" }));
            record.extend(slots(extra.clone()));

            let result = Movie::from_slots(&record, &Registry::new(), &persons);

            assert!(matches!(result, Err(Violation::Constraint(_))), "{}", extra);
        }
    }

    #[test]
    fn biographies_are_about_an_existing_person() {
        let persons = persons();
        let record = |about: Value| {
            slots(json!({ "movieId": 5, "title": "A Beautiful Mind", "category": "biography", "about": about }))
        };

        let missing = Movie::from_slots(&record(Value::Null), &Registry::new(), &persons);
        assert!(matches!(missing, Err(Violation::MandatoryValue(_))));

        let dangling = Movie::from_slots(&record(json!(99)), &Registry::new(), &persons);
        assert!(matches!(dangling, Err(Violation::ReferentialIntegrity(_))));

        let biography = Movie::from_slots(&record(json!(14)), &Registry::new(), &persons)
            .expect("create biography");
        assert_eq!(biography.kind(), &MovieKind::Biography { about: 14 });
        assert!(biography.references(14));
        assert_eq!(biography.without_person(14), None);
    }

    #[test]
    fn update_applies_changes_and_actor_deltas() {
        let persons = persons();
        let movie = pulp_fiction(&persons);

        let (next, changed) = movie
            .updated(
                &slots(json!({
                    "movieId": 1,
                    "title": "Pulp Fiction",
                    "releaseDate": null,
                    "actorIdRefsToAdd": [14],
                    "actorIdRefsToRemove": "5, 6",
                })),
                &persons,
            )
            .expect("apply update");

        assert_eq!(changed, vec!["releaseDate", "actors"]);
        assert_eq!(next.release_date(), None);
        assert_eq!(next.actors().iter().copied().collect::<Vec<_>>(), vec![3, 14]);
        assert_eq!(movie.actors().len(), 3);
    }

    #[test]
    fn update_refuses_to_change_category() {
        let persons = persons();
        let movie = pulp_fiction(&persons);

        let result = movie.updated(&slots(json!({ "category": "biography", "about": 14 })), &persons);

        assert!(matches!(result, Err(Violation::Constraint(_))));
    }

    #[test]
    fn dropping_a_person_clears_references() {
        let persons = persons();
        let movie = pulp_fiction(&persons);

        let next = movie.without_person(3).expect("keep movie");

        assert_eq!(next.director(), None);
        assert!(!next.references(3));
        assert!(next.references(5));
    }

    #[test]
    fn serializes_a_flat_record() {
        let persons = persons();

        assert_eq!(
            serde_json::to_value(pulp_fiction(&persons)).expect("serialize movie"),
            json!({
                "movieId": 1,
                "title": "Pulp Fiction",
                "releaseDate": "1994-05-12",
                "director": 3,
                "actors": [3, 5, 6],
            })
        );
    }

    proptest! {
        #[test]
        fn movies_round_trip_through_their_records(
            id in 1..=u64::MAX,
            title in "[A-Za-z0-9][A-Za-z0-9 :,'!-]{0,100}[A-Za-z0-9]",
            days in 0i64..50_000,
            director in proptest::option::of(prop_oneof![Just(3u64), Just(5), Just(6)]),
            actors in proptest::collection::btree_set(prop_oneof![Just(3u64), Just(5), Just(6), Just(14)], 0..4),
            kind in 0..3,
        ) {
            let persons = persons();
            let released = EARLIEST_RELEASE_DATE + time::Duration::days(days);
            let mut record = json!({
                "movieId": id,
                "title": title,
                "releaseDate": released.format(DATE_FORMAT).expect("format date"),
                "director": director,
                "actors": actors,
            });

            match kind {
                1 => {
                    record["category"] = json!("tvSeriesEpisode");
                    record["tvSeriesName"] = json!("The Loudest Voice");
                    record["episodeNo"] = json!(6);
                }
                2 => {
                    record["category"] = json!("biography");
                    record["about"] = json!(14);
                }
                _ => {}
            }

            let original = Movie::from_slots(&slots(record), &Registry::new(), &persons)
                .expect("create movie");
            let serialized = serde_json::to_value(&original).expect("serialize movie");
            let restored = Movie::from_slots(&slots(serialized), &Registry::new(), &persons)
                .expect("restore movie");

            prop_assert_eq!(restored, original);
        }
    }
}
