mod redacted_key;
mod report;
