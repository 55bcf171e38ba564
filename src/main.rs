use forkify::{
    BrowserConfig, Controller, FileStore, ForkifyClient, HashLocation, Location, RecipeModel,
    Region,
};
use log::{debug, error};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage:
  forkify search <query> [page]
  forkify show <id> [servings]
  forkify bookmark <id>
  forkify bookmarks";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = args.first() else {
        return Err(USAGE.into());
    };

    let config = BrowserConfig::load()?;
    debug!("Using API at {}", config.api_url);
    let client = ForkifyClient::new(&config)?;
    let store = FileStore::new(&config.bookmarks_path);
    let model = RecipeModel::new(Box::new(client), Box::new(store), config.results_per_page)?;
    let location = HashLocation::default();
    let mut controller = Controller::new(model, Box::new(location.clone()), &config);

    match (command.as_str(), &args[1..]) {
        ("search", [query, rest @ ..]) => {
            controller.control_search_results(query).await;
            if let Some(page) = rest.first() {
                controller.control_pagination(page.parse()?);
            }
            print_region(controller.results_view().region());
            print_region(controller.pagination_view().region());
        }
        ("show", [id, rest @ ..]) => {
            location.push_id(id);
            controller.control_recipe().await;
            if let Some(servings) = rest.first() {
                controller.control_servings(servings.parse()?);
            }
            print_region(controller.recipe_view().region());
        }
        ("bookmark", [id]) => {
            location.push_id(id);
            controller.control_recipe().await;
            if controller.model().state().recipe.is_none() {
                print_region(controller.recipe_view().region());
                return Err(format!("Could not load recipe {}", id).into());
            }
            controller.control_toggle_bookmark();
            let status = if controller.model().state().is_bookmarked(id) {
                "Bookmarked"
            } else {
                "Removed bookmark"
            };
            println!("{} {}", status, id);
        }
        ("bookmarks", []) => {
            controller.control_bookmarks();
            print_region(controller.bookmarks_view().region());
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

/// Print the visible text of a region, one non-blank line per line.
fn print_region(region: &Region) {
    for line in region.text_content().lines() {
        let line = line.trim();
        if !line.is_empty() {
            println!("{}", line);
        }
    }
}
