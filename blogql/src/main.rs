use std::net::SocketAddr;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use blogql::{start_blog_server, Config, Error};

const DEFAULT_LISTEN: &str = "0.0.0.0:2777";

fn cli() -> Command {
    Command::new("blogql")
        .about("GraphQL blog server")
        .arg(
            Arg::new("listen")
                .long("listen")
                .short('l')
                .value_name("ADDR")
                .value_parser(value_parser!(SocketAddr))
                .default_value(DEFAULT_LISTEN)
                .help("Address to serve GraphQL on"),
        )
        .arg(
            Arg::new("prefill")
                .long("prefill")
                .short('p')
                .action(ArgAction::SetTrue)
                .help("Prefill demo data")
                .long_help("Starts with three users, a handful of posts and some comments already in the store."),
        )
}

fn config(matches: &ArgMatches) -> Config {
    let defaults = Config::default();

    Config {
        listen: matches
            .get_one::<SocketAddr>("listen")
            .copied()
            .unwrap_or(defaults.listen),
        prefill: matches.get_flag("prefill"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let matches = cli().get_matches();

    start_blog_server(config(&matches)).await
}
