use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Sets up stderr logging for the climb binaries, keeping stdout for the answer.
///
/// Debug messages show up with `verbose`; a `RUST_LOG` filter overrides both levels.
pub fn init(verbose: bool) {
    let default_level = match verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    builder.target(Target::Stderr).format_timestamp(None);

    // A second call keeps whichever logger came first.
    builder.try_init().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init(true);
        init(false);
        log::debug!("still logging after second init");
    }
}
