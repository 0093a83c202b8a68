use std::{collections::HashMap, io, sync::Arc};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use regex_router::{
    all, get, post,
    http::{
        env::Environment,
        error::RoutingError,
        protocol::header,
        req::Request,
        res::Response,
        router::Router,
        sink::WireSink,
        types::{bound, fresh},
    },
    route,
};

#[derive(Parser, Debug)]
#[command(name = "http-dispatch", about = "Dispatch one request through the demo task routes")]
struct Opt {
    #[arg(long, default_value = "GET")]
    method: String,

    /// 可以带查询串，例如 /tasks/get/1?verbose=1
    #[arg(long, default_value = "/")]
    uri: String,

    /// `Name: Value`，可重复
    #[arg(long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// `name=value`，可重复
    #[arg(long = "cookie", value_parser = parse_cookie)]
    cookies: Vec<(String, String)>,

    #[arg(long, default_value = "")]
    body: String,

    #[arg(long)]
    remote_addr: Option<String>,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected `Name: Value`, got `{s}`"))
}

fn parse_cookie(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected `name=value`, got `{s}`"))
}

#[derive(Debug, Clone, Serialize)]
struct Task {
    id: u64,
    title: String,
}

struct TaskStore {
    tasks: HashMap<u64, Task>,
}

impl TaskStore {
    fn seeded() -> Self {
        let tasks = [(1, "write docs"), (2, "review routes")]
            .into_iter()
            .map(|(id, title)| (id, Task { id, title: title.to_string() }))
            .collect();
        Self { tasks }
    }

    fn show(&self, _req: &Request, res: &mut Response, params: &[String]) -> anyhow::Result<()> {
        let id: u64 = params[0].parse()?;
        match self.tasks.get(&id) {
            Some(task) => {
                res.header(header::CONTENT_TYPE, "application/json");
                res.body_json(task)?;
            }
            None => {
                res.code(404).body("task not found");
            }
        }
        Ok(())
    }
}

/// 每次请求新建，用来演示按请求实例化的处理器
#[derive(Default)]
struct DeleteController {
    deleted: Vec<u64>,
}

impl DeleteController {
    fn delete(&mut self, _req: &Request, res: &mut Response, params: &[String]) -> anyhow::Result<()> {
        let id: u64 = params[0].parse()?;
        self.deleted.push(id);
        res.code(204).remove_cookie(&format!("task-{id}"));
        Ok(())
    }
}

fn create_task(req: &Request, res: &mut Response, _params: &[String]) -> anyhow::Result<()> {
    let title = req.param("title").context("missing `title` parameter")?;
    res.code(201)
        .redirect("/tasks/get/3")
        .cookie("last-task", title, 3600)
        .body_json(&Task {
            id: 3,
            title: title.to_string(),
        })?;
    Ok(())
}

fn health(req: &Request, res: &mut Response, _params: &[String]) -> anyhow::Result<()> {
    res.header(header::CONTENT_TYPE, "text/plain").body("ok");
    if let Some(ip) = req.ip() {
        res.body(" ").body(ip);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();

    let mut env = Environment::new(opt.method, opt.uri).with_body(opt.body);
    for (name, value) in opt.headers {
        env = env.with_header(name, value);
    }
    for (name, value) in opt.cookies {
        env = env.with_cookie(name, value);
    }
    if let Some(addr) = opt.remote_addr {
        env = env.with_remote_addr(addr);
    }

    let store = Arc::new(TaskStore::seeded());
    let mut router: Router = Router::new();
    route!(
        router,
        get!(r"/tasks/get/([0-9]+)", bound(store, TaskStore::show)),
        get!(r"/tasks/delete/([0-9]+)", fresh(DeleteController::default, DeleteController::delete)),
        post!(r"/tasks$", create_task),
        all!(r"/health", health),
    )?;

    let req = Request::new(env);
    let mut res = Response::new();

    if let Err(err) = router.run(&req, &mut res) {
        match err.downcast_ref::<RoutingError>() {
            Some(routing) => {
                info!(%routing, "responding with 404");
                res = Response::new();
                res.code(404).body("Not Found");
            }
            None => return Err(err),
        }
    }

    let stdout = io::stdout();
    res.send(&mut WireSink::new(stdout.lock()))?;
    Ok(())
}
