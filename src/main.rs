use std::error::Error;
use std::process;

use dotenv::dotenv;
use log::{error, info, o, Logger};
use serde::Serialize;
use structopt::StructOpt;

use moviedb::config::Config;
use moviedb::db::Db;
use moviedb::errors::DbError;
use moviedb::label::{self, Id};
use moviedb::movie::Movie;
use moviedb::person::Person;
use moviedb::registry::{slots_from_value, Entity, Slots};
use moviedb::store::FileStore;

#[derive(Debug, StructOpt)]
#[structopt(name = "moviedb", about = "Manage a database of movies and the people who make them")]
enum Command {
    /// Add, update, delete or list persons
    Person(PersonCommand),

    /// Add, update, delete or list movies of any category
    Movie(MovieCommand),

    /// Print the roles a person can take on
    Roles,

    /// Print the special categories of movie
    Categories,

    /// Replace the database with the sample dataset
    GenerateTestData,

    /// Delete every record
    Clear,
}

#[derive(Debug, StructOpt)]
enum PersonCommand {
    /// Add a person given as a JSON object
    Add {
        #[structopt(parse(try_from_str = parse_slots))]
        slots: Slots,
    },

    /// Update the person named by the `personId` of a JSON object
    Update {
        #[structopt(parse(try_from_str = parse_slots))]
        slots: Slots,
    },

    /// Delete a person and every reference to them
    Destroy { id: Id },

    /// Print every person
    List,

    /// Print the movies a person directed or played in
    Movies { id: Id },
}

#[derive(Debug, StructOpt)]
enum MovieCommand {
    /// Add a movie given as a JSON object
    Add {
        #[structopt(parse(try_from_str = parse_slots))]
        slots: Slots,
    },

    /// Update the movie named by the `movieId` of a JSON object
    Update {
        #[structopt(parse(try_from_str = parse_slots))]
        slots: Slots,
    },

    /// Delete a movie
    Destroy { id: Id },

    /// Print every movie
    List,
}

#[derive(Serialize)]
struct Filmography<'a> {
    directed: Vec<&'a Movie>,
    played: Vec<&'a Movie>,
}

fn parse_slots(s: &str) -> Result<Slots, DbError> {
    let value = serde_json::from_str(s)?;

    Ok(slots_from_value(value)?)
}

fn main() {
    dotenv().ok();

    let command = Command::from_args();
    let logger = log::initialize_logger();

    if let Err(e) = run(command, &logger) {
        error!(logger, "Command failed"; "error" => %e);
        eprintln!("{}", e);

        // the async drain would drop pending records on exit
        drop(logger);
        process::exit(1);
    }
}

fn run(command: Command, logger: &Logger) -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;

    let logger = logger.new(o!("data_dir" => config.data_dir.display().to_string()));
    let store = FileStore::new(config.data_dir.clone());
    let mut db = Db::new(store, logger.clone()).with_pretty_json(config.pretty_json);

    match command {
        Command::Roles => return print(&label::roles(), config.pretty_json),
        Command::Categories => return print(&label::categories(), config.pretty_json),
        Command::GenerateTestData => {
            db.generate_test_data()?;
            info!(logger, "Test data generated"; "persons" => db.persons().len(), "movies" => db.movies().len());
            return Ok(());
        }
        Command::Clear => return Ok(db.clear_data()?),
        _ => {}
    }

    db.retrieve_all();

    let mutated = match command {
        Command::Person(PersonCommand::Add { slots }) => {
            let person = db.add_person(slots)?;
            print(person, config.pretty_json)?;
            true
        }
        Command::Person(PersonCommand::Update { slots }) => {
            let changed = db.update_person(slots)?;
            print(&changed, config.pretty_json)?;
            !changed.is_empty()
        }
        Command::Person(PersonCommand::Destroy { id }) => db.destroy_person(id),
        Command::Person(PersonCommand::List) => {
            print(&db.persons().iter().collect::<Vec<_>>(), config.pretty_json)?;
            false
        }
        Command::Person(PersonCommand::Movies { id }) => {
            if !db.persons().contains(id) {
                return Err(DbError::NotFound {
                    entity: Person::NAME,
                    id,
                }
                .into());
            }

            let filmography = Filmography {
                directed: db.directed_movies(id),
                played: db.played_movies(id),
            };
            print(&filmography, config.pretty_json)?;
            false
        }
        Command::Movie(MovieCommand::Add { slots }) => {
            let movie = db.add_movie(slots)?;
            print(movie, config.pretty_json)?;
            true
        }
        Command::Movie(MovieCommand::Update { slots }) => {
            let changed = db.update_movie(slots)?;
            print(&changed, config.pretty_json)?;
            !changed.is_empty()
        }
        Command::Movie(MovieCommand::Destroy { id }) => db.destroy_movie(id),
        Command::Movie(MovieCommand::List) => {
            print(&db.movies().iter().collect::<Vec<_>>(), config.pretty_json)?;
            false
        }
        Command::Roles | Command::Categories | Command::GenerateTestData | Command::Clear => false,
    };

    if mutated {
        db.save_all()?;
    }

    Ok(())
}

fn print(value: &impl Serialize, pretty: bool) -> Result<(), Box<dyn Error>> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    println!("{}", text);

    Ok(())
}
