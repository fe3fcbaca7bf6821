#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Delay, Frame, GenericImageView, Rgba, RgbaImage};
    use std::collections::BTreeSet;
    use std::fs::{self, File};
    use std::io::BufReader;
    use std::path::Path;
    use std::time::Duration;
    use thumbsweep::{FolderProcessor, Stage, ThumbnailConfig, Writer};

    fn write_gif(path: &Path, width: u32, height: u32, frames: usize) {
        let frames: Vec<Frame> = (0..frames)
            .map(|i| {
                let shade = (i * 40 % 256) as u8;
                let buffer = RgbaImage::from_pixel(width, height, Rgba([shade, 0, 255 - shade, 255]));
                Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(250, 1))
            })
            .collect();
        Writer::new().save_animation(frames, path).unwrap();
    }

    fn read_gif(path: &Path) -> Vec<Frame> {
        let decoder = GifDecoder::new(BufReader::new(File::open(path).unwrap())).unwrap();
        decoder.into_frames().collect_frames().unwrap()
    }

    fn file_set(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    fn processor(scale: f64) -> FolderProcessor {
        FolderProcessor::new(ThumbnailConfig::default().with_scale(scale)).unwrap()
    }

    #[test]
    fn test_full_run_generates_thumbnails_and_manifest() {
        let temp_dir = TempDir::new().unwrap();
        image::RgbImage::new(101, 61).save(temp_dir.child("photo.png").path()).unwrap();
        image::RgbImage::new(80, 45).save(temp_dir.child("photo.jpg").path()).unwrap();
        write_gif(temp_dir.child("clip.gif").path(), 30, 21, 4);

        let report = processor(0.5).run(temp_dir.path()).unwrap();

        assert_eq!(report.thumbnails, 3);
        assert!(!report.has_failures());

        let png = image::open(temp_dir.child("photo_thumb.png").path()).unwrap();
        assert_eq!(png.dimensions(), (50, 30));
        let jpg = image::open(temp_dir.child("photo_thumb.jpg").path()).unwrap();
        assert_eq!(jpg.dimensions(), (40, 22));

        let frames = read_gif(temp_dir.child("clip_thumb.gif").path());
        assert_eq!(frames.len(), 4);
        for frame in &frames {
            assert_eq!(frame.buffer().dimensions(), (15, 10));
            assert_eq!(Duration::from(frame.delay()), Duration::from_millis(100));
        }

        temp_dir.child("image_list.txt").assert(
            "Format: png\n- photo.png\n\nFormat: jpg\n- photo.jpg\n\nFormat: jpeg\n\nFormat: gif\n- clip.gif\n\n",
        );
    }

    #[test]
    fn test_cleanup_keeps_sources_and_renames() {
        let temp_dir = TempDir::new().unwrap();
        image::RgbImage::new(8, 8).save(temp_dir.child("a.png").path()).unwrap();
        image::RgbImage::new(8, 8).save(temp_dir.child("a (1).JPG").path()).unwrap();
        temp_dir.child("old_thumb.png").write_binary(b"stale").unwrap();

        processor(0.5).run(temp_dir.path()).unwrap();

        let files = file_set(temp_dir.path());
        let expected: BTreeSet<String> = ["a.png", "a1.JPG", "a_thumb.png", "a1_thumb.JPG", "image_list.txt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_empty_folder_still_gets_manifest() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir.child("notes.txt").write_str("hello").unwrap();

        let report = processor(0.25).run(temp_dir.path()).unwrap();

        assert_eq!(report.thumbnails, 0);
        temp_dir
            .child("image_list.txt")
            .assert("Format: png\n\nFormat: jpg\n\nFormat: jpeg\n\nFormat: gif\n\n");
    }

    #[test]
    fn test_second_run_regenerates_same_file_set() {
        let temp_dir = TempDir::new().unwrap();
        image::RgbImage::new(64, 64).save(temp_dir.child("my photo.png").path()).unwrap();
        write_gif(temp_dir.child("spin (2).gif").path(), 16, 16, 3);

        processor(0.25).run(temp_dir.path()).unwrap();
        let first = file_set(temp_dir.path());
        let first_manifest = fs::read_to_string(temp_dir.child("image_list.txt").path()).unwrap();

        let report = processor(0.25).run(temp_dir.path()).unwrap();
        let second = file_set(temp_dir.path());
        let second_manifest = fs::read_to_string(temp_dir.child("image_list.txt").path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_manifest, second_manifest);
        assert_eq!(report.deleted, 2);
        assert_eq!(report.renamed, 0);
        assert!(second.contains("myphoto_thumb.png"));
        assert!(second.contains("spin2_thumb.gif"));
    }

    #[test]
    fn test_corrupt_gif_is_logged_and_skipped() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir.child("broken.gif").write_binary(b"not a gif at all").unwrap();
        image::RgbImage::new(20, 20).save(temp_dir.child("ok.png").path()).unwrap();

        let report = processor(0.5).run(temp_dir.path()).unwrap();

        assert!(!temp_dir.child("broken_thumb.gif").path().exists());
        assert!(temp_dir.child("ok_thumb.png").path().exists());
        assert_eq!(report.failures_in(Stage::Thumbnail).count(), 1);
    }

    #[test]
    fn test_manifest_failure_does_not_stop_thumbnails() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir.child("image_list.txt").create_dir_all().unwrap();
        image::RgbImage::new(20, 20).save(temp_dir.child("ok.png").path()).unwrap();

        let report = processor(0.5).run(temp_dir.path()).unwrap();

        assert_eq!(report.failures_in(Stage::Manifest).count(), 1);
        assert_eq!(report.thumbnails, 1);
        assert!(temp_dir.child("ok_thumb.png").path().exists());
    }

    #[test]
    fn test_truncated_gif_does_not_hang_the_run() {
        let temp_dir = TempDir::new().unwrap();
        let full = temp_dir.child("full.gif");
        write_gif(full.path(), 40, 30, 8);
        let bytes = fs::read(full.path()).unwrap();
        temp_dir.child("cut.gif").write_binary(&bytes[..bytes.len() / 3]).unwrap();
        fs::remove_file(full.path()).unwrap();
        temp_dir.child("header.gif").write_binary(b"GIF89a").unwrap();
        image::RgbImage::new(20, 20).save(temp_dir.child("ok.png").path()).unwrap();

        let report = processor(0.5).run(temp_dir.path()).unwrap();

        assert!(temp_dir.child("ok_thumb.png").path().exists());
        assert!(!temp_dir.child("header_thumb.gif").path().exists());
        assert!(report.failures_in(Stage::Thumbnail).count() >= 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_source_is_cataloged_and_thumbnailed() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let real = outside.child("real.png");
        image::RgbImage::new(16, 16).save(real.path()).unwrap();
        std::os::unix::fs::symlink(real.path(), temp_dir.child("my link.png").path()).unwrap();

        let report = processor(0.5).run(temp_dir.path()).unwrap();

        assert_eq!(report.renamed, 1);
        assert_eq!(report.thumbnails, 1);
        let thumb = image::open(temp_dir.child("mylink_thumb.png").path()).unwrap();
        assert_eq!(thumb.dimensions(), (8, 8));
        temp_dir
            .child("image_list.txt")
            .assert("Format: png\n- mylink.png\n\nFormat: jpg\n\nFormat: jpeg\n\nFormat: gif\n\n");
    }

    #[test]
    fn test_invalid_folder() {
        let result = processor(0.25).run(Path::new("definitely/not/here"));
        assert!(result.is_err());
    }
}
