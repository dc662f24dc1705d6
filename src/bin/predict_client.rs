use anyhow::Context;
use clap::{Parser, ValueEnum};
use heart_predict::client::{PatientRecord, PredictionClient, RiskAssessment, Sex};
use heart_predict::utils::logger;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(value: SexArg) -> Self {
        match value {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "predict-client")]
#[command(about = "Checks a patient's heart disease risk against the prediction API")]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    endpoint: String,

    #[arg(long, help = "Only report the service health")]
    health: bool,

    #[arg(long, default_value_t = 45, value_parser = clap::value_parser!(u32).range(1..=120))]
    age: u32,

    #[arg(long, value_enum, default_value_t = SexArg::Male)]
    sex: SexArg,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    cp: u8,

    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(u32).range(80..=200))]
    trestbps: u32,

    #[arg(long, default_value_t = 220, value_parser = clap::value_parser!(u32).range(100..=600))]
    chol: u32,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    fbs: u8,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    restecg: u8,

    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(u32).range(60..=220))]
    thalach: u32,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    exang: u8,

    #[arg(long, default_value_t = 1.0)]
    oldpeak: f64,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    slope: u8,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    ca: u8,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    thal: u8,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

impl Args {
    fn record(&self) -> PatientRecord {
        PatientRecord {
            age: self.age,
            sex: Sex::from(self.sex).code(),
            cp: self.cp,
            trestbps: self.trestbps,
            chol: self.chol,
            fbs: self.fbs,
            restecg: self.restecg,
            thalach: self.thalach,
            exang: self.exang,
            oldpeak: self.oldpeak,
            slope: self.slope,
            ca: self.ca,
            thal: self.thal,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if !(0.0..=6.0).contains(&args.oldpeak) {
        anyhow::bail!("--oldpeak must be between 0.0 and 6.0");
    }

    let client = PredictionClient::new(&args.endpoint)?;

    if args.health {
        let report = client
            .health()
            .await
            .with_context(|| format!("Failed to reach {}", args.endpoint))?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let result = client
        .predict(&args.record())
        .await
        .with_context(|| format!("Failed to get a prediction from {}", args.endpoint))?;

    println!("{}", RiskAssessment::from_response(result).render());
    Ok(())
}
