//! Basic framesync demo
//!
//! Runs one node of a cluster with a synthetic input device. Start one
//! `--role server --clients N` and N `--role client` processes, or a single
//! `--role standalone` process.

use std::{process::ExitCode, thread, time::Duration};

use clap::Parser;
use log::{debug, error, info};

use framesync_client::{Client, ClientConfig};
use framesync_server::{FramesyncServerError, Server, ServerConfig};
use framesync_shared::{
    DispatchError, Dispatcher, EventList, EventRecord, NodeConfig, NodeRole, Pose, Vec2,
    DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_PORT,
};

const EXIT_CONNECTION_BROKEN: u8 = 2;
const EXIT_PROTOCOL_DESYNC: u8 = 3;
const EXIT_CONFIG: u8 = 64;

const FRAME_TIME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "framesync-basic", version, about = "Framesync cluster demo node")]
struct Args {
    /// standalone, client or server
    #[arg(long, default_value = "standalone")]
    role: NodeRole,

    /// Address of the server, used by clients
    #[arg(long, default_value = DEFAULT_SERVER_ADDRESS)]
    server_ip: String,

    #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
    server_port: u16,

    /// Number of clients the server waits for
    #[arg(long, default_value_t = 1)]
    clients: usize,

    /// Extra name for a raw event, as ALIAS=RAW. May be repeated.
    #[arg(long = "alias", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,

    /// Frames to run before exiting, 0 runs forever
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Log every dispatched event
    #[arg(long)]
    debug_log_events: bool,
}

fn parse_alias(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((alias, raw)) if !alias.is_empty() && !raw.is_empty() => {
            Ok((alias.to_string(), raw.to_string()))
        }
        _ => Err(format!("expected ALIAS=RAW, got '{}'", value)),
    }
}

impl Args {
    fn node_config(&self) -> NodeConfig {
        NodeConfig {
            role: self.role,
            server_address: self.server_ip.clone(),
            server_port: self.server_port,
            expected_clients: self.clients,
            aliases: self.aliases.clone(),
            debug_log_events: self.debug_log_events,
            ..NodeConfig::default()
        }
    }
}

/// Stands in for a tracked wand: moves in a circle and clicks once a second
struct SyntheticWand {
    node: String,
    frame: u64,
}

impl SyntheticWand {
    fn new(role: NodeRole) -> Self {
        Self {
            node: role.to_string(),
            frame: 0,
        }
    }

    fn collect(&mut self, events: &mut EventList) {
        self.frame += 1;
        let angle = self.frame as f32 * 0.05;

        let mut pose = Pose::default();
        pose.position.x = angle.cos();
        pose.position.z = angle.sin();
        events.push(EventRecord::tracker_move(format!("{}Wand_Move", self.node), &pose));

        if self.frame % 60 == 0 {
            events.push(EventRecord::button_down(format!("{}WandBtn_Down", self.node)));
        }
        if self.frame % 60 == 5 {
            events.push(EventRecord::button_up(format!("{}WandBtn_Up", self.node)));
            events.push(EventRecord::cursor_move(
                format!("{}Cursor_Move", self.node),
                Vec2::new(960.0, 540.0),
                Vec2::new(0.5, 0.5),
            ));
        }
    }
}

fn build_dispatcher(config: &NodeConfig) -> Result<Dispatcher, ExitCode> {
    match config.role {
        NodeRole::Standalone => Ok(Dispatcher::with_config(
            framesync_shared::Standalone,
            config,
        )),
        NodeRole::NetClient => {
            let client = Client::connect(ClientConfig::from(config)).map_err(|err| {
                error!("{}", err);
                ExitCode::from(EXIT_CONFIG)
            })?;
            Ok(Dispatcher::with_config(client, config))
        }
        NodeRole::NetServer => {
            let server = Server::listen(ServerConfig::from(config)).map_err(|err| {
                error!("{}", err);
                match err {
                    FramesyncServerError::Bind { .. } => ExitCode::from(EXIT_CONFIG),
                    FramesyncServerError::Accept { .. } => ExitCode::from(EXIT_CONNECTION_BROKEN),
                }
            })?;
            Ok(Dispatcher::with_config(server, config))
        }
    }
}

fn exit_code(error: &DispatchError) -> ExitCode {
    match error {
        DispatchError::Connection(inner) if inner.is_broken() => {
            ExitCode::from(EXIT_CONNECTION_BROKEN)
        }
        DispatchError::Connection(_) => ExitCode::from(EXIT_PROTOCOL_DESYNC),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = args.node_config();
    info!("framesync demo starting as {}", config.role);

    let mut dispatcher = match build_dispatcher(&config) {
        Ok(dispatcher) => dispatcher,
        Err(code) => return code,
    };

    let mut wand = SyntheticWand::new(config.role);
    dispatcher.add_event_generator(move |events: &mut EventList| wand.collect(events));

    dispatcher.add_button_down_listener("NetServerWandBtn_Down", || {
        info!("Server wand clicked");
    });
    dispatcher.add_tracker_listener("NetServerWand_Move", |pose| {
        debug!("Server wand at {:?}", pose.position);
    });
    dispatcher.add_event_listener(|event| {
        log::trace!("{}", event);
    });

    let mut frame = 0u64;
    while args.frames == 0 || frame < args.frames {
        if let Err(err) = dispatcher.pre_update() {
            error!("Frame {}: {}", frame, err);
            return exit_code(&err);
        }

        // scene update and rendering happen here
        thread::sleep(FRAME_TIME);

        if let Err(err) = dispatcher.post_render() {
            error!("Frame {}: {}", frame, err);
            return exit_code(&err);
        }
        frame += 1;
    }

    info!("Finished {} frame(s)", frame);
    ExitCode::SUCCESS
}
