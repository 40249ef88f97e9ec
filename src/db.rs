use log::{debug, error, info, o, warn, Logger};
use serde_json::Value;

use crate::errors::DbError;
use crate::label::{Enumeration, Id};
use crate::movie::{check_category, check_movie_id, Category, Movie};
use crate::person::{check_person_id, Person};
use crate::registry::{slots_from_value, Document, Entity, Registry, Slots};
use crate::store::Store;
use crate::test_data;
use crate::validation::{ValidationResult, Violation};

pub const PERSONS_KEY: &str = "persons";
pub const MOVIES_KEY: &str = "movies";
pub const TV_SERIES_EPISODES_KEY: &str = "tvSeriesEpisodes";

/// Every key written by [`Db::save_all`].
pub const KEYS: [&str; 3] = [PERSONS_KEY, MOVIES_KEY, TV_SERIES_EPISODES_KEY];

/// The outcome of [`Db::retrieve_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetrieveSummary {
    pub persons: usize,
    pub movies: usize,
    pub skipped: usize,
}

/// The repository: the person and movie registries together with the
/// store they are loaded from and saved to.
pub struct Db<S> {
    logger: Logger,
    store: S,
    persons: Registry<Person>,
    movies: Registry<Movie>,
    pretty_json: bool,
}

impl<S: Store> Db<S> {
    /// Creates a repository with empty registries. Nothing is read
    /// until [`Db::retrieve_all`] is called.
    pub fn new(store: S, logger: Logger) -> Self {
        Db {
            logger,
            store,
            persons: Registry::new(),
            movies: Registry::new(),
            pretty_json: false,
        }
    }

    /// Sets whether documents are pretty-printed when saved.
    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = pretty_json;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn persons(&self) -> &Registry<Person> {
        &self.persons
    }

    pub fn movies(&self) -> &Registry<Movie> {
        &self.movies
    }

    /// Creates a person from `slots` and adds it to the registry.
    pub fn add_person(&mut self, slots: Slots) -> Result<&Person, DbError> {
        let person = Person::from_slots(&slots, &self.persons)
            .map_err(|v| self.reject::<Person>("add", v))?;

        info!(self.logger, "Saved person"; "id" => person.person_id(), "name" => person.name());

        Ok(self.persons.insert(person))
    }

    /// Applies the fields in `slots` to the person named by its
    /// `personId`, returning the names of the fields that changed.
    /// Either every field is applied or none is.
    pub fn update_person(&mut self, slots: Slots) -> Result<Vec<&'static str>, DbError> {
        let id = check_person_id(slots.get("personId"))
            .map_err(|v| self.reject::<Person>("update", v))?;
        let current = self.persons.get(id).ok_or(DbError::NotFound {
            entity: Person::NAME,
            id,
        })?;

        let (next, changed) = current
            .updated(&slots)
            .map_err(|v| self.reject::<Person>("update", v))?;

        if self.log_changes(Person::NAME, id, &changed) {
            self.persons.insert(next);
        }

        Ok(changed)
    }

    /// Removes a person. Movies lose their references to the person;
    /// biographies about the person are removed with it. Returns
    /// `false` if there was no such person.
    pub fn destroy_person(&mut self, id: Id) -> bool {
        let person = match self.persons.remove(id) {
            Some(person) => person,
            None => {
                warn!(self.logger, "There is no person to delete"; "id" => id);
                return false;
            }
        };

        let affected = self
            .movies
            .iter()
            .filter(|m| m.references(id))
            .map(|m| (m.movie_id(), m.without_person(id)))
            .collect::<Vec<_>>();

        for (movie_id, movie) in affected {
            match movie {
                Some(movie) => {
                    debug!(self.logger, "Dropped references to deleted person"; "id" => id, "movie_id" => movie_id);
                    self.movies.insert(movie);
                }
                None => {
                    info!(self.logger, "Deleted biography of deleted person"; "id" => id, "movie_id" => movie_id);
                    self.movies.remove(movie_id);
                }
            }
        }

        info!(self.logger, "Deleted person"; "id" => id, "name" => person.name());

        true
    }

    /// Creates a movie of any kind from `slots` and adds it to the
    /// registry.
    pub fn add_movie(&mut self, slots: Slots) -> Result<&Movie, DbError> {
        let movie = Movie::from_slots(&slots, &self.movies, &self.persons)
            .map_err(|v| self.reject::<Movie>("add", v))?;

        info!(self.logger, "Saved movie"; "id" => movie.movie_id(), "title" => movie.title(), "category" => ?movie.category());

        Ok(self.movies.insert(movie))
    }

    /// Applies the fields in `slots` to the movie named by its
    /// `movieId`, returning the names of the fields that changed.
    /// Either every field is applied or none is.
    pub fn update_movie(&mut self, slots: Slots) -> Result<Vec<&'static str>, DbError> {
        let id = check_movie_id(slots.get("movieId"))
            .map_err(|v| self.reject::<Movie>("update", v))?;
        let current = self.movies.get(id).ok_or(DbError::NotFound {
            entity: Movie::NAME,
            id,
        })?;

        let (next, changed) = current
            .updated(&slots, &self.persons)
            .map_err(|v| self.reject::<Movie>("update", v))?;

        if self.log_changes(Movie::NAME, id, &changed) {
            self.movies.insert(next);
        }

        Ok(changed)
    }

    /// Removes a movie of any kind. Returns `false` if there was no
    /// such movie.
    pub fn destroy_movie(&mut self, id: Id) -> bool {
        match self.movies.remove(id) {
            Some(movie) => {
                info!(self.logger, "Deleted movie"; "id" => id, "title" => movie.title());
                true
            }
            None => {
                warn!(self.logger, "There is no movie to delete"; "id" => id);
                false
            }
        }
    }

    /// Returns the movies directed by the given person.
    pub fn directed_movies(&self, person_id: Id) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|m| m.director() == Some(person_id))
            .collect()
    }

    /// Returns the movies the given person acted in.
    pub fn played_movies(&self, person_id: Id) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|m| m.actors().contains(&person_id))
            .collect()
    }

    /// Replaces the registries with the contents of the store. Records
    /// that fail validation are skipped, and unreadable documents are
    /// treated as empty.
    pub fn retrieve_all(&mut self) -> RetrieveSummary {
        self.persons.clear();
        self.movies.clear();

        let mut summary = RetrieveSummary::default();

        for (key, record) in self.load_document(PERSONS_KEY) {
            let person =
                slots_from_value(record).and_then(|s| Person::from_slots(&s, &self.persons));

            match person {
                Ok(person) => {
                    self.persons.insert(person);
                }
                Err(v) => self.skip(PERSONS_KEY, &key, &v, &mut summary),
            }
        }

        for (key, record) in self.load_document(MOVIES_KEY) {
            match self.movie_from_record(record, None) {
                Ok(movie) => {
                    self.movies.insert(movie);
                }
                Err(v) => self.skip(MOVIES_KEY, &key, &v, &mut summary),
            }
        }

        for (key, record) in self.load_document(TV_SERIES_EPISODES_KEY) {
            match self.movie_from_record(record, Some(Category::TvSeriesEpisode)) {
                Ok(movie) => {
                    self.movies.insert(movie);
                }
                Err(v) => self.skip(TV_SERIES_EPISODES_KEY, &key, &v, &mut summary),
            }
        }

        summary.persons = self.persons.len();
        summary.movies = self.movies.len();

        info!(self.logger, "Records loaded"; "persons" => summary.persons, "movies" => summary.movies, "skipped" => summary.skipped);

        summary
    }

    /// Writes every registry to the store: persons, then movies other
    /// than TV series episodes, then TV series episodes.
    pub fn save_all(&self) -> Result<(), DbError> {
        self.save_document(PERSONS_KEY, self.persons.to_document(|_| true)?)?;
        self.save_document(
            MOVIES_KEY,
            self.movies.to_document(|m| !m.is_tv_series_episode())?,
        )?;
        self.save_document(
            TV_SERIES_EPISODES_KEY,
            self.movies.to_document(Movie::is_tv_series_episode)?,
        )?;

        Ok(())
    }

    /// Empties the registries and every document in the store.
    pub fn clear_data(&mut self) -> Result<(), DbError> {
        self.persons.clear();
        self.movies.clear();

        for key in KEYS.iter() {
            self.save_document(key, Document::new())?;
        }

        info!(self.logger, "All data cleared");

        Ok(())
    }

    /// Replaces the registries with the sample dataset and saves it.
    pub fn generate_test_data(&mut self) -> Result<(), DbError> {
        self.persons.clear();
        self.movies.clear();

        for record in test_data::persons() {
            self.add_person(slots_from_value(record)?)?;
        }

        for record in test_data::movies() {
            self.add_movie(slots_from_value(record)?)?;
        }

        self.save_all()
    }

    fn movie_from_record(
        &self,
        record: Value,
        category: Option<Category>,
    ) -> ValidationResult<Movie> {
        let mut slots = slots_from_value(record)?;

        if let Some(category) = category {
            match check_category(slots.get("category"))? {
                None => {
                    slots.insert(
                        "category".to_owned(),
                        Value::String(category.name().to_owned()),
                    );
                }
                Some(given) if given == category => {}
                Some(given) => {
                    return Err(Violation::Constraint(format!(
                        "A {} record does not belong in the {:?} document",
                        given.name(),
                        category
                    )))
                }
            }
        }

        Movie::from_slots(&slots, &self.movies, &self.persons)
    }

    fn load_document(&self, key: &str) -> Document {
        let logger = self.logger.new(o!("key" => key.to_owned()));

        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(logger, "No document saved yet");
                return Document::new();
            }
            Err(e) => {
                error!(logger, "Error when reading from the store"; "error" => %e);
                return Document::new();
            }
        };

        match serde_json::from_str::<Document>(&text) {
            Ok(document) => document,
            Err(e) => {
                error!(logger, "Error when parsing a stored document"; "error" => %e);
                Document::new()
            }
        }
    }

    fn save_document(&self, key: &str, document: Document) -> Result<(), DbError> {
        let count = document.len();
        let value = Value::Object(document);

        let text = if self.pretty_json {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };

        self.store.set(key, text).map_err(|e| {
            error!(self.logger, "Error when writing to the store"; "key" => key, "error" => %e);
            e
        })?;

        info!(self.logger, "Records saved"; "key" => key, "count" => count);

        Ok(())
    }

    fn log_changes(&self, entity: &str, id: Id, changed: &[&str]) -> bool {
        if changed.is_empty() {
            info!(self.logger, "No property value changed"; "entity" => entity, "id" => id);
            false
        } else {
            info!(self.logger, "Properties modified"; "entity" => entity, "id" => id, "properties" => changed.join(", "));
            true
        }
    }

    fn reject<E: Entity>(&self, operation: &str, violation: Violation) -> DbError {
        warn!(self.logger, "Constraint violation";
            "entity" => E::NAME,
            "operation" => operation,
            "kind" => violation.kind(),
            "message" => violation.message());

        DbError::Violation(violation)
    }

    fn skip(&self, key: &str, record: &str, violation: &Violation, summary: &mut RetrieveSummary) {
        warn!(self.logger, "Skipping invalid record";
            "key" => key,
            "record" => record,
            "kind" => violation.kind(),
            "message" => violation.message());

        summary.skipped += 1;
    }
}
