// src/tests/utils.rs
use crate::domain::{ListingRecord, Source};
use crate::scraper::{ScraperError, SourceAdapter};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread;

pub fn record(source: Source, title: &str, location: &str, size_sqm: f64) -> ListingRecord {
    ListingRecord {
        title: title.to_string(),
        price: "ETB 1,000,000".to_string(),
        location: location.to_string(),
        size_sqm,
        source,
        link: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
    }
}

pub fn records(source: Source, count: usize) -> Vec<ListingRecord> {
    (0..count)
        .map(|i| record(source, &format!("{source} listing {i}"), "Bole", (i * 10) as f64))
        .collect()
}

pub enum FakeOutcome {
    Rows(Vec<ListingRecord>),
    Fail,
    Panic,
    /// Blocks until the test sends on the gate, then returns no rows.
    Gated(Mutex<Receiver<()>>),
}

/// Stand-in adapter with a scripted outcome.
pub struct FakeAdapter {
    source: Source,
    outcome: FakeOutcome,
    calls: Arc<AtomicUsize>,
}

impl FakeAdapter {
    pub fn new(source: Source, outcome: FakeOutcome) -> Self {
        Self {
            source,
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl SourceAdapter for FakeAdapter {
    fn source(&self) -> Source {
        self.source
    }

    fn scrape(&self, _max_pages: u32) -> Result<Vec<ListingRecord>, ScraperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            FakeOutcome::Rows(rows) => Ok(rows.clone()),
            FakeOutcome::Fail => Err(ScraperError::Network("connection refused".to_string())),
            FakeOutcome::Panic => panic!("adapter blew up"),
            FakeOutcome::Gated(gate) => {
                let gate = gate.lock().unwrap();
                gate.recv().unwrap();
                Ok(Vec::new())
            }
        }
    }
}

/// HTTP/1.1 server on a random loopback port. Every request target (path and
/// query) is recorded, then answered with whatever `route` returns.
pub struct LoopbackServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl LoopbackServer {
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        // Detached: the thread ends with the test process.
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    break;
                };
                let target = read_request_target(&mut stream);
                seen.lock().unwrap().push(target.clone());

                let (status, body) = route(&target);
                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nContent-Type: text/html; charset=utf-8\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.write_all(body.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request_target(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&head)
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

/// `LIVINGETHIO_PAGE` with its `totalPages` replaced.
pub fn livingethio_page(total_pages: u32) -> String {
    let mut body: serde_json::Value = serde_json::from_str(LIVINGETHIO_PAGE).unwrap();
    body["totalPages"] = total_pages.into();
    body.to_string()
}

pub const JIJI_RESPONSE: &str = r#"{
  "adverts_list": {
    "adverts": [
      {
        "title": "House  for sale in\nBole",
        "url": "/bole/houses-apartments-for-sale/house-1.html",
        "region_name": "Bole, Addis Ababa",
        "price_obj": { "value": 15000000 },
        "attrs": [
          { "name": "Bedrooms", "value": "4" },
          { "name": "Property size", "value": "300 sqm" }
        ]
      },
      {
        "title": "Villa",
        "url": "/cmc/houses-apartments-for-sale/villa-2.html",
        "region_name": "CMC",
        "price_obj": { "value": "8,500,000" },
        "attrs": []
      },
      {
        "title": "Contact for price",
        "url": "/ayat/houses-apartments-for-sale/house-3.html",
        "region_name": "Ayat",
        "attrs": [ { "name": "Property size", "value": 250 } ]
      },
      { "title": 42 }
    ]
  }
}"#;

pub const REALETHIO_PAGE: &str = r#"<html><body>
<div class="item-listing-wrap">
  <h2 class="item-title"><a href="https://realethio.com/property/villa-bole/">Villa  in Bole</a></h2>
  <address class="item-address">Bole,   Addis Ababa</address>
  <ul class="item-amenities">
    <li><span>4</span> Beds</li>
    <li><span>250</span> m²</li>
  </ul>
  <span class="item-price">ETB 25,000,000</span>
</div>
<div class="item-listing-wrap">
  <h2 class="item-title"><a href="/property/g2-summit/">G+2 at Summit</a></h2>
  <address class="item-address">Summit</address>
  <ul class="item-amenities"><li><span>1,200</span> mÂ²</li></ul>
  <span class="item-price">ETB 40,000,000</span>
</div>
<div class="item-listing-wrap">
  <h2 class="item-title"><a href="/property/no-size/">No size given</a></h2>
  <address class="item-address">Ayat</address>
  <span class="item-price">Call</span>
</div>
<div class="item-listing-wrap">
  <h2 class="item-title"><a href="/property/broken/">Missing price</a></h2>
  <address class="item-address">Gerji</address>
</div>
</body></html>"#;

pub const ETHIOPIAREALTY_INDEX: &str = r#"<html><body>
<nav>
  <ul class="pagination">
    <li><a class="page-link" href="/building-for-sale/">1</a></li>
    <li><a class="page-link" href="/building-for-sale/page/2/">2</a></li>
    <li><a class="page-link" href="/building-for-sale/page/2/">Next</a></li>
    <li><a class="page-link" href="/building-for-sale/page/3/">3</a></li>
    <li><a class="page-link">…</a></li>
  </ul>
</nav>
</body></html>"#;

pub const ETHIOPIAREALTY_PAGE: &str = r#"<html><body>
<div class="d-flex align-items-center h-100">
  <div class="item-body">
    <h2 class="item-title"><a href="/property/building-cmc/">Building  at CMC</a></h2>
    <address class="item-address">CMC , Addis Ababa</address>
    <ul><li class="h-area"><span class="hz-figure">1,200</span> m²</li></ul>
    <div class="item-price">ETB 90,000,000</div>
  </div>
</div>
<div class="d-flex align-items-center h-100">
  <div class="item-body">
    <h2 class="item-title"><a href="https://ethiopiarealty.com/property/mixed-use/">Mixed use</a></h2>
    <address class="item-address">Kazanchis</address>
    <div class="item-price">ETB 120000000</div>
  </div>
</div>
<div class="d-flex align-items-center h-100">
  <div class="item-body"><p>Advert block without a listing</p></div>
</div>
</body></html>"#;

pub const LIVINGETHIO_PAGE: &str = r#"{
  "totalPages": 3,
  "records": [
    { "id": "abc123", "title": "G+2  house", "price": 12000000, "area": "350", "location": { "name": "Summit" } },
    { "id": 7, "title": "No area", "price": 100, "area": null, "location": { "name": "Bole" } },
    { "id": 8, "title": "Zero area", "area": 0 },
    { "id": 9, "title": "Call for price", "area": 200.5, "location": { "name": "Ayat" } }
  ]
}"#;
