use clap::{ArgAction, Parser, Subcommand};

use crate::catalog::{CategoryFilter, Subgroup};
use crate::commands::{
    ListOptions, cmd_browse, cmd_config_path, cmd_config_show, cmd_list, cmd_show,
};
use crate::config::Config;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "dexview")]
#[command(about = "Browse a paginated creature catalog from the terminal")]
#[command(version)]
pub struct Cli {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Catalog API base URL (overrides config and DEXVIEW_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Entries per page (overrides config and DEXVIEW_PAGE_SIZE)
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse interactively
    #[command(visible_alias = "b")]
    Browse,

    /// Print one page of the catalog
    #[command(visible_alias = "ls")]
    List {
        /// Name substring to search for (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Category to filter by, or 'all'
        #[arg(short, long, default_value = "all", value_parser = parse_category)]
        category: CategoryFilter,

        /// Generation (1-7) to filter by, or 'all'
        #[arg(short = 'g', long = "generation", visible_alias = "subgroup", default_value = "all", value_parser = parse_subgroup)]
        subgroup: Subgroup,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the details of one entry
    #[command(visible_alias = "s")]
    Show {
        /// Entry id
        id: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the config file path
    Path,
}

impl Cli {
    /// Load configuration, then apply command-line overrides
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(size) = self.page_size {
            config.page_size = size;
        }
        config.validate()?;
        Ok(config)
    }

    /// Execute the parsed command
    pub async fn run(self) -> Result<()> {
        let config = self.config()?;

        match self.command {
            Commands::Browse => cmd_browse(&config).await,

            Commands::List {
                search,
                category,
                subgroup,
                page,
                json,
            } => {
                let options = ListOptions {
                    search,
                    category,
                    subgroup,
                    page,
                };
                cmd_list(&config, options, json).await
            }

            Commands::Show { id, json } => cmd_show(&config, id, json).await,

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(&config, json),
                ConfigAction::Path => cmd_config_path(),
            },
        }
    }
}

fn parse_category(s: &str) -> std::result::Result<CategoryFilter, String> {
    s.parse().map_err(|e: crate::error::DexError| e.to_string())
}

fn parse_subgroup(s: &str) -> std::result::Result<Subgroup, String> {
    s.parse().map_err(|e: crate::error::DexError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["dexview", "list"]).unwrap();
        let Commands::List {
            search,
            category,
            subgroup,
            page,
            json,
        } = cli.command
        else {
            panic!("expected list");
        };
        assert!(search.is_none());
        assert_eq!(category, CategoryFilter::All);
        assert_eq!(subgroup, Subgroup::All);
        assert_eq!(page, 1);
        assert!(!json);
    }

    #[test]
    fn test_list_filters() {
        let cli = Cli::try_parse_from([
            "dexview", "ls", "-s", "chu", "-c", "Electric", "-g", "1", "-p", "2", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::List {
            search,
            category,
            subgroup,
            page,
            ..
        } = cli.command
        else {
            panic!("expected list");
        };
        assert_eq!(search.as_deref(), Some("chu"));
        assert_eq!(category, CategoryFilter::Only("electric".to_string()));
        assert_eq!(subgroup, Subgroup::Generation(1));
        assert_eq!(page, 2);
    }

    #[test]
    fn test_invalid_generation_is_rejected() {
        assert!(Cli::try_parse_from(["dexview", "list", "-g", "8"]).is_err());
    }

    #[test]
    fn test_global_overrides() {
        let cli =
            Cli::try_parse_from(["dexview", "show", "25", "--page-size", "20", "--api-url", "http://x/"])
                .unwrap();
        assert_eq!(cli.page_size, Some(20));
        assert_eq!(cli.api_url.as_deref(), Some("http://x/"));
        assert!(matches!(cli.command, Commands::Show { id: 25, json: false }));
    }
}
