use crate::bootstrap;
use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Route a parsed command to its handler. Every command except `schema`
/// needs the populated store.
pub fn dispatch(command: &Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Schema => commands::schema::handle(flags),
        Commands::List(args) => commands::list::handle(args, bootstrap::init(flags)?, flags),
        Commands::Show(args) => commands::show::handle(args, bootstrap::init(flags)?, flags),
        Commands::Instantiate(args) => {
            commands::instantiate::handle(args, bootstrap::init(flags)?, flags)
        }
    }
}
