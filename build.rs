#[cfg(windows)]
fn main() {
    let mut res = winres::WindowsResource::new();
    res.set("ProductName", "Subsampling Detector");
    res.set("FileDescription", "Subsampling Detector - OBS Studio video filter");
    res.set("LegalCopyright", "© 2023 Subsampling Detector Contributors");
    res.set("OriginalFilename", "subsampling_detector.dll");

    if let Err(e) = res.compile() {
        eprintln!("Failed to compile Windows resource: {}", e);
    }
}

#[cfg(not(windows))]
fn main() {
}
