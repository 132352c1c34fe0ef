//! Extracts features from a synthetic bipolar magnetogram and prints the
//! labeled CSV record.

use mag_features::{FeatureRecord, Image, Label, extract_features};

fn main() {
    let (w, h) = (128usize, 128usize);
    let mut data = vec![0.0f64; w * h];
    for r in 0..h {
        for c in 0..w {
            let dx = c as f64 - w as f64 / 2.0;
            let dy = r as f64 - h as f64 / 2.0;
            data[r * w + c] = dx * (-(dx * dx + dy * dy) / 600.0).exp() * 1200.0;
        }
    }
    let img = Image::from_vec(w, h, data).expect("valid image");

    let features = extract_features(&img).expect("valid image");
    let record = FeatureRecord {
        features,
        label: Label::Unlabeled,
        file_name: "synthetic_bipole.png".to_string(),
    };

    println!("{record}");
}
