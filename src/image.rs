use crate::refs::{ObjectReferences, RefType};
use crate::LabelError;
use image::{ColorType, DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::{Path, PathBuf};

/// Where the pixels of an image come from
pub enum RasterImage {
    /// An RGB JPEG file, which PDF can embed without re-encoding
    DirectlyEmbeddableJpeg(PathBuf),
    Decoded(DynamicImage),
}

/// A raster image that can be placed on pages or inside labels. Images are stored once
/// per document and can be placed any number of times.
pub struct Image {
    pub image: RasterImage,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk. RGB JPEGs are embedded as-is; anything else the
    /// [image] crate can decode is re-encoded losslessly.
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, LabelError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;

        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;

        match (format, decoded.color()) {
            (image::ImageFormat::Jpeg, ColorType::Rgb8) => Ok(Image {
                width: decoded.width(),
                height: decoded.height(),
                image: RasterImage::DirectlyEmbeddableJpeg(path.to_owned()),
            }),
            _ => Ok(Image::new(decoded)),
        }
    }

    /// Wrap an already decoded image
    pub fn new(image: DynamicImage) -> Image {
        Image {
            width: image.width(),
            height: image.height(),
            image: RasterImage::Decoded(image),
        }
    }

    fn encode(&self) -> Result<EncodeOutput, LabelError> {
        match &self.image {
            RasterImage::DirectlyEmbeddableJpeg(path) => Ok(EncodeOutput {
                filter: Filter::DctDecode,
                bytes: std::fs::read(path)?,
                mask: None,
            }),
            RasterImage::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                Ok(EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                })
            }
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), LabelError> {
        let id = refs.get(RefType::Image(image_index));
        let encoded = self.encode()?;

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.get(RefType::ImageMask(image_index)));
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}
