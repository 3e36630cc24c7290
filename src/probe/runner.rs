use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use crate::error::ConfigError;
use crate::report;

use super::error_chain;
use super::result::ProbeResult;
use super::session::{ProbePlan, ProbeSession};

/// Execute a session's specs against the live endpoint and collect outcomes.
///
/// `concurrency` bounds how many probes may be in flight at once; 1 (the
/// default when run as a command) keeps the report strictly sequential.
/// Whatever the bound, the returned sequence matches the input spec order:
/// tasks are spawned per spec and joined in spawn order, so completion
/// timing never reorders results.
///
/// Always returns one [`ProbeResult`] per input spec. Individual transport
/// failures are recorded in the result and never abort the session; the only
/// error path is a [`ConfigError`] raised before any probe has executed.
pub async fn run(
    session: &ProbeSession,
    concurrency: usize,
) -> Result<Vec<ProbeResult>, ConfigError> {
    if concurrency == 0 {
        return Err(ConfigError::InvalidConcurrency);
    }
    let plans = session.prepare()?;

    let client = Client::builder()
        .timeout(session.request_timeout())
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let deadline = session.deadline().map(|budget| Instant::now() + budget);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    let mut handles = Vec::with_capacity(plans.len());
    for plan in plans {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            probe_one(&client, plan, deadline).await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await.expect("probe task panicked");
        if !session.quiet {
            report::print_probe_line(&result);
        }
        results.push(result);
    }
    Ok(results)
}

/// One-shot probe: issue, await completion or error, record. No retry, no
/// backoff; a transport failure is terminal for this probe only.
async fn probe_one(
    client: &Client,
    plan: ProbePlan,
    deadline: Option<Instant>,
) -> ProbeResult {
    let started_at = Utc::now();
    let start = Instant::now();
    log::debug!("probing {} {}", plan.spec.method, plan.url);

    let mut request = client
        .request(plan.spec.method.as_reqwest(), plan.url.clone())
        .headers(plan.headers);
    if let Some(body) = plan.body {
        request = request.body(body);
    }

    // Reading the body counts against the deadline too: a probe only
    // completed once its response text is in hand.
    let exchange = async {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok::<_, reqwest::Error>((status, body))
    };

    let outcome = match deadline {
        Some(at) => {
            let remaining = at.saturating_duration_since(Instant::now());
            match timeout(remaining, exchange).await {
                Ok(completed) => completed.map(Some),
                Err(_) => Ok(None),
            }
        }
        None => exchange.await.map(Some),
    };
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(Some((status, body))) => ProbeResult {
            spec: plan.spec,
            started_at,
            status: Some(status),
            body: Some(body),
            duration_ms,
            error: None,
        },
        Ok(None) => ProbeResult {
            spec: plan.spec,
            started_at,
            status: None,
            body: None,
            duration_ms,
            error: Some(format!(
                "timeout: session deadline exceeded after {duration_ms:.0}ms"
            )),
        },
        Err(err) => {
            let description = if err.is_timeout() {
                format!("timeout: {}", error_chain(&err))
            } else {
                error_chain(&err)
            };
            ProbeResult {
                spec: plan.spec,
                started_at,
                status: None,
                body: None,
                duration_ms,
                error: Some(description),
            }
        }
    }
}
