use crate::config::{ConfigError, TickMode};

/// Command-line options. Everything else comes from the config file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<String>,
    pub seed: Option<u64>,
    pub music: Option<String>,
    pub tick_mode: Option<TickMode>,
}

impl CliArgs {
    pub fn parse_cli<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = CliArgs::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| ConfigError::Usage(format!("{flag} needs a value")))
            };
            match arg.as_str() {
                "--config" => out.config = Some(value("--config")?),
                "--music" => out.music = Some(value("--music")?),
                "--seed" => {
                    let raw = value("--seed")?;
                    let seed = raw
                        .parse()
                        .map_err(|_| ConfigError::Usage(format!("--seed {raw} is not a number")))?;
                    out.seed = Some(seed);
                }
                "--fixed-hz" => {
                    let raw = value("--fixed-hz")?;
                    let hz: f32 = raw
                        .parse()
                        .map_err(|_| ConfigError::Usage(format!("--fixed-hz {raw} is not a number")))?;
                    if !(hz.is_finite() && hz > 0.0) {
                        return Err(ConfigError::Usage(format!("--fixed-hz {raw} must be positive")));
                    }
                    out.tick_mode = Some(TickMode::Fixed { hz });
                }
                "--frame-driven" => out.tick_mode = Some(TickMode::FrameDriven),
                other => return Err(ConfigError::Usage(format!("unknown argument {other}"))),
            }
        }
        Ok(out)
    }
}
