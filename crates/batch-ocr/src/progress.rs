use indicatif::ProgressStyle;

pub fn batch_bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{bar:40.cyan/blue} {percent:>3}% {pos}/{len} images [{elapsed_precise}] {msg}",
    )
    .expect("invalid batch bar template")
}
