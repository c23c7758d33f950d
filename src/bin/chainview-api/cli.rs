// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use clap::{Args, Parser};

/// Chainview cached Bitcoin address and transaction lookups
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct ClArgs {
    /// The location of the configuration file.
    #[arg(short, long, env = "CONFIG_PATH")]
    pub config: Option<String>,
    /// The environment name reported by the ping endpoint.
    #[arg(long, value_name = "NAME", env = "ENVIRONMENT")]
    pub environment: Option<String>,
    /// MongoDb arguments.
    #[command(flatten, next_help_heading = "MongoDb")]
    pub mongodb: MongoDbArgs,
    /// Redis arguments.
    #[command(flatten, next_help_heading = "Redis")]
    pub redis: RedisArgs,
    /// API arguments.
    #[command(flatten, next_help_heading = "API")]
    pub api: ApiArgs,
    /// Upstream explorer arguments.
    #[command(flatten, next_help_heading = "Upstream")]
    pub upstream: UpstreamArgs,
    /// Startup arguments.
    #[command(flatten, next_help_heading = "Startup")]
    pub startup: StartupArgs,
}

#[derive(Args, Debug)]
pub struct MongoDbArgs {
    /// The MongoDb connection string.
    #[arg(long, value_name = "CONN_STR", env = "MONGODB_CONN_STR")]
    pub mongodb_conn_str: Option<String>,
    /// The MongoDb database name.
    #[arg(long, value_name = "NAME", env = "MONGODB_DATABASE_NAME")]
    pub mongodb_database_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct RedisArgs {
    /// The Redis connection string.
    #[arg(long, value_name = "CONN_STR", env = "REDIS_CONN_STR")]
    pub redis_conn_str: Option<String>,
}

#[derive(Args, Debug)]
pub struct ApiArgs {
    /// The port to serve the API on.
    #[arg(long, value_name = "PORT", env = "API_PORT")]
    pub api_port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct UpstreamArgs {
    /// The base URL of the upstream explorer API.
    #[arg(long, value_name = "URL", env = "UPSTREAM_BASE_URL")]
    pub upstream_base_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct StartupArgs {
    /// Skip waiting for dependencies before serving.
    #[arg(long, env = "SKIP_READINESS_GATE")]
    pub skip_readiness_gate: bool,
}
