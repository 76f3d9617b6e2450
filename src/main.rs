use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yova::clock::SystemClock;
use yova::config::SpeechBackend;
use yova::navigation::{LogNavigator, Navigator, SystemBrowser};
use yova::services::Services;
use yova::voice::{ConsoleSpeech, SpeechDevice, Speaker, StdinTranscripts, normalize_transcript};
use yova::{Assistant, Config, DispatchSettings, Dispatcher};

/// `YoVa` - voice-driven personal assistant
#[derive(Parser)]
#[command(name = "yova", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Default speech locale (e.g. "en-US")
    #[arg(long, env = "YOVA_LANGUAGE")]
    language: Option<String>,

    /// Log links instead of opening them in a browser
    #[arg(long)]
    no_browser: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run an interactive session (default)
    Listen,
    /// Handle a single command and exit once it has been spoken
    Ask {
        /// The command, as it would be spoken
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print the intent a command classifies to, without acting on it
    Classify {
        /// The command, as it would be spoken
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Speak through the configured speech device
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,yova=info",
        1 => "info,yova=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load();
    if let Some(language) = cli.language {
        config.speech.language = language;
    }
    if cli.no_browser {
        config.browser.open_links = false;
    }
    tracing::debug!(?config, "loaded configuration");

    match cli.command.unwrap_or(Command::Listen) {
        Command::Listen => listen(&config).await,
        Command::Ask { text } => ask(&config, &text.join(" ")).await,
        Command::Classify { text } => classify(&text.join(" ")),
        Command::TestTts { text } => test_tts(&config, &text).await,
    }
}

#[allow(clippy::future_not_send)]
async fn listen(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        name = %config.assistant.name,
        language = %config.speech.language,
        backend = ?config.speech.backend,
        "starting assistant"
    );

    let dispatcher = dispatcher(config)?;

    #[cfg(feature = "audio")]
    let dispatcher = match microphone(config)? {
        Some(source) => {
            Assistant::new(dispatcher, source).run().await?;
            return Ok(());
        }
        None => dispatcher,
    };

    let prompt = format!("{}> ", config.assistant.name);
    Assistant::new(dispatcher, StdinTranscripts::stdin(prompt))
        .run()
        .await?;
    Ok(())
}

async fn ask(config: &Config, text: &str) -> anyhow::Result<()> {
    let Some(transcript) = normalize_transcript(text) else {
        anyhow::bail!("nothing to ask");
    };

    let mut dispatcher = dispatcher(config)?;
    let intent = dispatcher.handle(&transcript).await;
    dispatcher.finish_speaking().await;

    let pending = dispatcher.reminders().pending().len();
    if pending > 0 {
        tracing::warn!(pending, "exiting with reminders still pending");
    }
    tracing::debug!(intent = intent.name(), "handled");
    Ok(())
}

fn classify(text: &str) -> anyhow::Result<()> {
    let transcript = normalize_transcript(text).unwrap_or_default();
    let intent = yova::classify(&transcript);
    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}

async fn test_tts(config: &Config, text: &str) -> anyhow::Result<()> {
    println!("Testing speech output with text: \"{text}\"\n");

    let speaker = Speaker::new(speech_device(config)?, config.speech.language.clone());
    match speaker.speak(text) {
        Some(utterance) => {
            let end = utterance.finished().await;
            println!("\n---");
            println!("Utterance ended: {end:?}");
        }
        None => println!("Nothing to say."),
    }

    Ok(())
}

fn dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let speaker = Arc::new(Speaker::new(
        speech_device(config)?,
        config.speech.language.clone(),
    ));
    let services = Services::from_config(&config.services)?;
    let navigator: Arc<dyn Navigator> = if config.browser.open_links {
        Arc::new(SystemBrowser)
    } else {
        Arc::new(LogNavigator)
    };

    Ok(Dispatcher::new(
        speaker,
        services,
        navigator,
        Arc::new(SystemClock),
        DispatchSettings::from_config(config),
    ))
}

fn speech_device(config: &Config) -> anyhow::Result<Arc<dyn SpeechDevice>> {
    match config.speech.backend {
        SpeechBackend::Console => Ok(Arc::new(ConsoleSpeech::new(&config.assistant.name))),
        SpeechBackend::Voice => voice_output(config),
    }
}

#[cfg(feature = "audio")]
fn voice_output(config: &Config) -> anyhow::Result<Arc<dyn SpeechDevice>> {
    use yova::voice::{AudioPlayback, TextToSpeech, VoiceOutput};

    let api_key = config
        .api_keys
        .openai
        .clone()
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY is required for the voice backend"))?;
    let tts = TextToSpeech::new_openai(
        api_key,
        config.speech.tts_model.clone(),
        config.speech.tts_voice.clone(),
        config.speech.tts_speed,
    )?;
    let playback = AudioPlayback::new()?;
    Ok(Arc::new(VoiceOutput::new(tts, playback)))
}

#[cfg(not(feature = "audio"))]
fn voice_output(config: &Config) -> anyhow::Result<Arc<dyn SpeechDevice>> {
    tracing::warn!("built without the `audio` feature, using console speech");
    Ok(Arc::new(ConsoleSpeech::new(&config.assistant.name)))
}

/// Microphone + STT source, when speaking aloud and an API key is configured
#[cfg(feature = "audio")]
fn microphone(config: &Config) -> anyhow::Result<Option<yova::voice::MicrophoneTranscripts>> {
    use yova::voice::{AudioCapture, MicrophoneTranscripts, SpeechToText};

    if config.speech.backend != SpeechBackend::Voice {
        return Ok(None);
    }

    let Some(api_key) = config.api_keys.openai.clone() else {
        tracing::warn!("no OpenAI API key, reading commands from stdin");
        return Ok(None);
    };

    let stt = SpeechToText::new_whisper(api_key, config.speech.stt_model.clone())?;
    let capture = AudioCapture::new()?;
    Ok(Some(MicrophoneTranscripts::new(
        capture,
        stt,
        config.speech.listen_window,
    )))
}
