use std::env;
use std::ffi::OsStr;

use log::{error, info};
use seahorse::{App, Command, Context, Flag, FlagType};

use attendance_sync::input::Config;

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    run();
}

mod seahorse_exts {
    use std::path::PathBuf;

    use anyhow::Context as _;
    use seahorse::Context;

    pub trait ContextExt {
        fn context(&self) -> &Context;

        fn required_string_flag(&self, name: &str) -> Result<String, anyhow::Error> {
            self.context()
                .string_flag(name)
                .with_context(|| anyhow::anyhow!("missing required flag \"{}\"", name))
        }

        fn required_path_flag(&self, name: &str) -> Result<PathBuf, anyhow::Error> {
            self.required_string_flag(name).map(PathBuf::from)
        }
    }

    impl ContextExt for Context {
        fn context(&self) -> &Context {
            self
        }
    }
}

use seahorse_exts::ContextExt;

fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

fn load_config(context: &Context) -> anyhow::Result<Config> {
    let path = context.required_path_flag("config")?;
    let config = Config::from_toml_file(&path)?;

    info!("loaded configuration from \"{}\"", path.display());

    Ok(config)
}

fn sync_action(context: &Context) {
    exit_on_error(load_config(context).and_then(|config| attendance_sync::sync_schedules(&config)));
}

fn list_users_action(context: &Context) {
    exit_on_error(load_config(context).and_then(|config| attendance_sync::list_users(&config)));
}

fn list_organizations_action(context: &Context) {
    let organization = context.string_flag("org").ok();

    exit_on_error(load_config(context).and_then(|config| {
        attendance_sync::list_organizations(&config, organization.as_deref())
    }));
}

fn config_flag() -> Flag {
    Flag::new("config", FlagType::String).description("Path to the configuration file.")
}

fn run() {
    let args: Vec<String> = env::args().collect();

    let sync_command = Command::new("sync")
        .usage(format!("{} sync --config <path>", args[0]))
        .description("Fetches schedule events and writes the attendance grids.")
        .flag(config_flag())
        .action(sync_action);

    let list_users_command = Command::new("list-users")
        .usage(format!("{} list-users --config <path>", args[0]))
        .description("Prints the groupware user directory as JSON.")
        .flag(config_flag())
        .action(list_users_action);

    let list_organizations_command = Command::new("list-organizations")
        .usage(format!(
            "{} list-organizations --config <path> [--org <id>]",
            args[0]
        ))
        .description("Prints the organization directory, or one organization's members, as JSON.")
        .flag(config_flag())
        .flag(Flag::new("org", FlagType::String).description("Organization id to list the members of."))
        .action(list_organizations_action);

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} [command] [args]", args[0]))
        .command(sync_command)
        .command(list_users_command)
        .command(list_organizations_command);

    app.run(args);
}
