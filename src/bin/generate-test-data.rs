use std::error::Error;
use std::path::PathBuf;

use dotenv::dotenv;
use log::{info, o};
use structopt::StructOpt;

use moviedb::config::Config;
use moviedb::db::Db;
use moviedb::store::FileStore;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "generate-test-data",
    about = "Replace the movie database with the sample dataset"
)]
struct Opt {
    /// The directory to write the documents to, instead of MOVIEDB_DATA_DIR
    #[structopt(long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    /// Pretty-print the documents
    #[structopt(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let opt = Opt::from_args();
    let config = Config::from_env()?;

    let data_dir = opt.data_dir.unwrap_or(config.data_dir);
    let logger = log::initialize_logger().new(o!("data_dir" => data_dir.display().to_string()));

    let mut db = Db::new(FileStore::new(data_dir), logger.clone())
        .with_pretty_json(opt.pretty || config.pretty_json);

    info!(logger, "Generating test data...");
    db.generate_test_data()?;

    let summary = db.retrieve_all();
    info!(logger, "Generated test data"; "persons" => summary.persons, "movies" => summary.movies);

    println!(
        "Generated {} persons and {} movies",
        summary.persons, summary.movies
    );

    Ok(())
}
