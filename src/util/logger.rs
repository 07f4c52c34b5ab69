use ::log::LevelFilter;

use crate::error::TResult;

/// Parse a `loglevel` config value
fn parse_level(levelstr: &str) -> LevelFilter {
    match levelstr.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => {
            println!("todoist_sync: config: bad `loglevel` value (\"{}\"), defaulting to \"warn\"", levelstr);
            LevelFilter::Warn
        }
    }
}

fn timestamp() -> String {
    match time::now().strftime("%Y-%m-%d][%H:%M:%S") {
        Ok(x) => x.to_string(),
        Err(_) => String::from("????-??-??][??:??:??"),
    }
}

/// a simple wrapper (pretty much direct from documentation) that sets up
/// logging to STDOUT via fern/log
pub fn setup_logger() -> TResult<()> {
    let levelstr: String = config::get(&["loglevel"])?;
    let level = parse_level(&levelstr);
    let res = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", timestamp(), record.level(), message))
        })
        .level(level)
        .chain(::std::io::stdout())
        .apply();
    match res {
        Ok(_) => {}
        // someone already set a logger up. fine.
        Err(_) => log::set_max_level(level),
    }
    Ok(())
}
