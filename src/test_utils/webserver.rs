use mockito::{mock, Mock};

pub struct MockWebserver {
    mock: Mock,
}

impl MockWebserver {
    pub fn from_json(path: &str, method: &str, json_string: &str) -> Self {
        Self {
            mock: mock(method, path)
                .with_header("content-type", "application/json")
                .with_body(json_string)
                .create(),
        }
    }

    /// Like `from_json`, but fails the test unless the mock is hit
    /// exactly `hits` times before `assert` is called.
    pub fn from_json_with_expect(path: &str, method: &str, json_string: &str, hits: usize) -> Self {
        Self {
            mock: mock(method, path)
                .with_header("content-type", "application/json")
                .with_body(json_string)
                .expect(hits)
                .create(),
        }
    }

    pub fn from_status_with_expect(path: &str, method: &str, status: usize, hits: usize) -> Self {
        Self {
            mock: mock(method, path).with_status(status).expect(hits).create(),
        }
    }

    pub fn assert(&self) {
        self.mock.assert()
    }
}
