use std::collections::BTreeMap;
use std::path::PathBuf;

use aethos_config::AethosConfig;
use aethos_ephem::{Body, ChartAngle, EphemerisProvider, TabulatedEphemeris, utc_from_jd};
use aethos_profile::{
    DailyTimingBuilder, GateWheel, GeneKey, HumanDesignLayer, NatalProfile, gene_keys_layer,
    human_design_layer,
};
use aethos_search::{DesignDate, solve_angle_crossing, solve_design_jd_with, solve_house_ingress};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aethos", about = "Aethos astrological timing engine", version)]
struct Cli {
    /// TOML configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Inputs {
    /// Natal profile JSON
    #[arg(long)]
    profile: PathBuf,
    /// Tabulated ephemeris JSON
    #[arg(long)]
    ephemeris: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Transit-to-natal aspect bundle for one day
    Daily {
        #[command(flatten)]
        inputs: Inputs,
        /// Local date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Local snapshot time (HH:MM:SS), overriding the configured one
        #[arg(long)]
        at: Option<NaiveTime>,
        /// Bound on returned aspects, overriding the configured one
        #[arg(long)]
        max_hits: Option<usize>,
    },
    /// Find when a body crosses a natal angle
    Crossing {
        #[command(flatten)]
        inputs: Inputs,
        /// Transiting body (Sun, Moon, Mars, ...)
        #[arg(long)]
        body: Body,
        /// Natal angle: Asc, MC, Desc or IC
        #[arg(long)]
        angle: ChartAngle,
        /// Window start, local (YYYY-MM-DDThh:mm:ss)
        #[arg(long)]
        from: NaiveDateTime,
        /// Window end, local (YYYY-MM-DDThh:mm:ss)
        #[arg(long)]
        to: NaiveDateTime,
    },
    /// Find when a body changes natal whole-sign house
    Ingress {
        #[command(flatten)]
        inputs: Inputs,
        /// Transiting body (Sun, Moon, Mars, ...)
        #[arg(long)]
        body: Body,
        /// Window start, local (YYYY-MM-DDThh:mm:ss)
        #[arg(long)]
        from: NaiveDateTime,
        /// Window end, local (YYYY-MM-DDThh:mm:ss)
        #[arg(long)]
        to: NaiveDateTime,
    },
    /// Solve the design date (Sun 88 degrees before birth)
    DesignDate {
        #[command(flatten)]
        inputs: Inputs,
        /// Birth instant, local (YYYY-MM-DDThh:mm:ss)
        #[arg(long)]
        birth: NaiveDateTime,
    },
    /// Human Design activations at birth and design
    Activations {
        #[command(flatten)]
        inputs: Inputs,
        /// Gate wheel JSON (gate -> start degree, all 64 gates)
        #[arg(long)]
        gate_wheel: PathBuf,
        /// Birth instant, local (YYYY-MM-DDThh:mm:ss)
        #[arg(long)]
        birth: NaiveDateTime,
        /// Also attach Gene Keys for every activation
        #[arg(long)]
        gene_keys: bool,
    },
}

#[derive(Serialize)]
struct DesignDateReport {
    birth_jd_ut: f64,
    design_utc: DateTime<Utc>,
    design: DesignDate,
}

#[derive(Serialize)]
struct GeneKeysReport {
    personality: BTreeMap<Body, GeneKey>,
    design: BTreeMap<Body, GeneKey>,
}

#[derive(Serialize)]
struct ActivationsReport {
    human_design: HumanDesignLayer,
    #[serde(skip_serializing_if = "Option::is_none")]
    gene_keys: Option<GeneKeysReport>,
}

fn load_inputs(inputs: &Inputs) -> Result<(NatalProfile, TabulatedEphemeris)> {
    let profile = NatalProfile::load(&inputs.profile)
        .with_context(|| format!("loading profile {}", inputs.profile.display()))?;
    let ephemeris = TabulatedEphemeris::load(&inputs.ephemeris)
        .with_context(|| format!("loading ephemeris {}", inputs.ephemeris.display()))?;
    Ok((profile, ephemeris))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AethosConfig::load_or_default(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::Daily {
            inputs,
            date,
            at,
            max_hits,
        } => {
            let (profile, eph) = load_inputs(&inputs)?;
            let mut settings = config.timing;
            if let Some(at) = at {
                settings.reference_time = at;
            }
            if let Some(n) = max_hits {
                settings.max_hits = n;
            }
            let bundle = DailyTimingBuilder::new(&eph)
                .with_settings(settings)
                .build(&profile, date)
                .context("building timing bundle")?;
            print_json(&bundle)
        }

        Commands::Crossing {
            inputs,
            body,
            angle,
            from,
            to,
        } => {
            let (profile, eph) = load_inputs(&inputs)?;
            let natal_lon = profile.angle(angle)?;
            let jd_start = eph.julian_day(from, &profile.site)?;
            let jd_end = eph.julian_day(to, &profile.site)?;
            let crossing = solve_angle_crossing(
                &eph,
                &profile.site,
                body,
                angle,
                natal_lon,
                jd_start,
                jd_end,
                &config.crossing,
            )
            .context("solving angle crossing")?;
            if crossing.is_none() {
                tracing::info!(%body, %angle, "no crossing in window");
            }
            print_json(&crossing)
        }

        Commands::Ingress {
            inputs,
            body,
            from,
            to,
        } => {
            let (profile, eph) = load_inputs(&inputs)?;
            let natal_asc = profile.angle(ChartAngle::Ascendant)?;
            let jd_start = eph.julian_day(from, &profile.site)?;
            let jd_end = eph.julian_day(to, &profile.site)?;
            let ingress = solve_house_ingress(
                &eph,
                &profile.site,
                body,
                natal_asc,
                jd_start,
                jd_end,
                &config.crossing,
            )
            .context("solving house ingress")?;
            print_json(&ingress)
        }

        Commands::DesignDate { inputs, birth } => {
            let (profile, eph) = load_inputs(&inputs)?;
            let birth_jd = eph.julian_day(birth, &profile.site)?;
            let design = solve_design_jd_with(&eph, &profile.site, birth_jd, &config.design)
                .context("solving design date")?;
            print_json(&DesignDateReport {
                birth_jd_ut: birth_jd,
                design_utc: utc_from_jd(design.jd_ut)?,
                design,
            })
        }

        Commands::Activations {
            inputs,
            gate_wheel,
            birth,
            gene_keys,
        } => {
            let (profile, eph) = load_inputs(&inputs)?;
            let wheel = GateWheel::load(&gate_wheel)
                .with_context(|| format!("loading gate wheel {}", gate_wheel.display()))?;
            let birth_jd = eph.julian_day(birth, &profile.site)?;
            let layer = human_design_layer(&eph, &profile.site, &wheel, birth_jd, &config.design)
                .context("computing human design layer")?;
            let gene_keys = if gene_keys {
                Some(GeneKeysReport {
                    personality: gene_keys_layer(&layer.personality_activations)?,
                    design: gene_keys_layer(&layer.design_activations)?,
                })
            } else {
                None
            };
            print_json(&ActivationsReport {
                human_design: layer,
                gene_keys,
            })
        }
    }
}
