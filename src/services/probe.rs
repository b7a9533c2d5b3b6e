//! # MP4 재생 시간 추출
//!
//! MP4/MOV 계열 파일은 박스(box, atom) 구조로 되어 있습니다.
//! 각 박스는 `[크기 4바이트][타입 4바이트][내용...]` 형태이고,
//! 재생 시간은 `moov` 박스 안의 `mvhd`(movie header) 박스에 들어 있습니다.
//!
//! ```text
//! ftyp ... | moov [ mvhd(version, ..., timescale, duration) | trak ... ] | mdat ...
//! ```
//!
//! 재생 시간(초) = duration / timescale
//!
//! 파일 전체를 디코딩하지 않고 헤더만 훑기 때문에 외부 도구(ffprobe) 없이 동작합니다.
//! 다른 컨테이너(webm, mkv)는 지원하지 않으며 None을 반환합니다.

/// 박스 하나의 위치 정보
struct BoxHeader {
    kind: [u8; 4],
    /// 내용 시작 오프셋 (헤더 바로 다음)
    body_start: usize,
    /// 박스 끝 오프셋 (exclusive)
    end: usize,
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at + 4)?;
    Some(u32::from_be_bytes(bytes.try_into().ok()?))
}

fn read_u64(data: &[u8], at: usize) -> Option<u64> {
    let bytes = data.get(at..at + 8)?;
    Some(u64::from_be_bytes(bytes.try_into().ok()?))
}

/// `[start, end)` 구간의 박스들을 순서대로 읽습니다.
fn boxes(data: &[u8], start: usize, end: usize) -> Vec<BoxHeader> {
    let mut found = Vec::new();
    let mut offset = start;

    while offset + 8 <= end {
        let Some(size32) = read_u32(data, offset) else { break };
        let mut kind = [0u8; 4];
        kind.copy_from_slice(&data[offset + 4..offset + 8]);

        let (size, header_len) = match size32 {
            // 크기 0: 파일 끝까지
            0 => ((end - offset) as u64, 8),
            // 크기 1: 뒤따르는 64비트 largesize 사용
            1 => match read_u64(data, offset + 8) {
                Some(large) => (large, 16),
                None => break,
            },
            n => (n as u64, 8),
        };

        if size < header_len as u64 {
            break;
        }
        // 크기가 구간을 넘거나 덧셈이 넘치면 깨진 파일로 보고 멈춥니다.
        let Some(box_end) = usize::try_from(size)
            .ok()
            .and_then(|size| offset.checked_add(size))
            .filter(|box_end| *box_end > offset && *box_end <= end)
        else {
            break;
        };

        found.push(BoxHeader {
            kind,
            body_start: offset + header_len,
            end: box_end,
        });
        offset = box_end;
    }

    found
}

/// MP4 바이트에서 재생 시간(초)을 읽습니다. 찾지 못하면 None.
pub fn mp4_duration_secs(data: &[u8]) -> Option<f64> {
    let moov = boxes(data, 0, data.len())
        .into_iter()
        .find(|b| &b.kind == b"moov")?;
    let mvhd = boxes(data, moov.body_start, moov.end)
        .into_iter()
        .find(|b| &b.kind == b"mvhd")?;

    let at = mvhd.body_start;
    let version = *data.get(at)?;
    // version(1) + flags(3) 다음부터 필드가 시작됩니다.
    let (timescale, duration, fields_end) = match version {
        // creation(4) modification(4) timescale(4) duration(4)
        0 => (read_u32(data, at + 12)?, read_u32(data, at + 16)? as u64, at + 20),
        // creation(8) modification(8) timescale(4) duration(8)
        1 => (read_u32(data, at + 20)?, read_u64(data, at + 24)?, at + 32),
        _ => return None,
    };

    if timescale == 0 || fields_end > mvhd.end {
        return None;
    }

    Some(duration as f64 / timescale as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mp4_box(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(body);
        out
    }

    fn mvhd_v0(timescale: u32, duration: u32) -> Vec<u8> {
        let mut body = vec![0u8, 0, 0, 0]; // version 0 + flags
        body.extend_from_slice(&0u32.to_be_bytes()); // creation
        body.extend_from_slice(&0u32.to_be_bytes()); // modification
        body.extend_from_slice(&timescale.to_be_bytes());
        body.extend_from_slice(&duration.to_be_bytes());
        body.extend_from_slice(&[0u8; 80]); // rate, volume, matrix...
        mp4_box(b"mvhd", &body)
    }

    #[test]
    fn reads_duration_from_version_zero_header() {
        let mut file = mp4_box(b"ftyp", b"isom\0\0\0\0isommp41");
        file.extend(mp4_box(b"moov", &mvhd_v0(1000, 12_500)));
        file.extend(mp4_box(b"mdat", &[0u8; 32]));

        assert_eq!(mp4_duration_secs(&file), Some(12.5));
    }

    #[test]
    fn reads_duration_from_version_one_header() {
        let mut body = vec![1u8, 0, 0, 0];
        body.extend_from_slice(&0u64.to_be_bytes());
        body.extend_from_slice(&0u64.to_be_bytes());
        body.extend_from_slice(&600u32.to_be_bytes());
        body.extend_from_slice(&(600u64 * 90).to_be_bytes());
        let moov = mp4_box(b"moov", &mp4_box(b"mvhd", &body));

        assert_eq!(mp4_duration_secs(&moov), Some(90.0));
    }

    #[test]
    fn moov_after_mdat_is_still_found() {
        let mut file = mp4_box(b"mdat", &[7u8; 64]);
        file.extend(mp4_box(b"moov", &mvhd_v0(30, 60)));

        assert_eq!(mp4_duration_secs(&file), Some(2.0));
    }

    #[test]
    fn non_mp4_data_has_no_duration() {
        assert_eq!(mp4_duration_secs(b"\x1aE\xdf\xa3 not an mp4"), None);
        assert_eq!(mp4_duration_secs(&[]), None);
    }

    #[test]
    fn huge_largesize_box_stops_the_scan() {
        let mut file = mp4_box(b"free", &[]);
        file.extend_from_slice(&1u32.to_be_bytes());
        file.extend_from_slice(b"moov");
        file.extend_from_slice(&u64::MAX.to_be_bytes());

        assert_eq!(mp4_duration_secs(&file), None);
    }

    #[test]
    fn truncated_box_header_has_no_duration() {
        // moov가 200바이트라고 주장하지만 실제로는 헤더만 있음
        let mut file = 200u32.to_be_bytes().to_vec();
        file.extend_from_slice(b"moov");
        assert_eq!(mp4_duration_secs(&file), None);

        // largesize 필드가 잘려 있음
        let mut file = 1u32.to_be_bytes().to_vec();
        file.extend_from_slice(b"moov");
        file.extend_from_slice(&[0u8, 0, 0]);
        assert_eq!(mp4_duration_secs(&file), None);
    }

    #[test]
    fn zero_timescale_is_rejected() {
        let file = mp4_box(b"moov", &mvhd_v0(0, 100));
        assert_eq!(mp4_duration_secs(&file), None);
    }
}
